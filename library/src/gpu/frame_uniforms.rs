use crate::gpu::frame_buffer_size::FrameBufferSize;
use bytemuck::{Pod, Zeroable};

/// Per-frame parameters, laid out as the kernel's uniform block.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub num_objects: u32,
    pub num_spheres: u32,
    pub frame_counter: u32,
    pub max_bounces: u32,
    pub rand0to1: f32,
    pub frame_width: u32,
    pub frame_height: u32,
    _pad: u32,
}

impl FrameUniforms {
    #[must_use]
    pub fn new(size: FrameBufferSize, num_objects: u32, num_spheres: u32, frame_counter: u32, max_bounces: u32, rand0to1: f32) -> Self {
        assert!((0.0..1.0).contains(&rand0to1), "random seed {rand0to1} is out of [0, 1)");
        Self {
            num_objects,
            num_spheres,
            frame_counter,
            max_bounces,
            rand0to1,
            frame_width: size.width(),
            frame_height: size.height(),
            _pad: 0,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
