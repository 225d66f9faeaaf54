use crate::error::TracerError;
use cgmath::Vector2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameBufferSize {
    width: u32,
    height: u32,
}

impl FrameBufferSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0);
        assert!(height > 0);
        Self { width, height }
    }

    /// Rejects empty frames and frames whose texel index does not fit the kernel's 32-bit addressing.
    pub fn checked(width: u32, height: u32) -> Result<Self, TracerError> {
        if width == 0 || height == 0 {
            return Err(TracerError::configuration(format!("frame of {width}x{height} pixels is empty")));
        }
        if u64::from(width) * u64::from(height) > u64::from(u32::MAX) {
            return Err(TracerError::configuration(format!("frame of {width}x{height} pixels is too large")));
        }
        Ok(Self::new(width, height))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn work_groups_count(&self, work_group_size: Vector2<u32>) -> Vector2<u32> {
        Vector2::new(
            self.width.div_ceil(work_group_size.x),
            self.height.div_ceil(work_group_size.y),
        )
    }
}
