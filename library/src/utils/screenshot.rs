use crate::error::TracerError;
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::serialization::pod_vector::PodVector;
use crate::utils::file_system::ensure_folders_exist;
use image::{ImageBuffer, Rgb, RgbImage};
use log::info;
use std::path::Path;

#[must_use]
fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Converts accumulated texels to 8-bit RGB; the first texel row becomes the last image row.
#[must_use]
pub fn to_rgb_image(pixels: &[PodVector], size: FrameBufferSize) -> RgbImage {
    assert_eq!(pixels.len(), size.area(), "pixel count differs from the frame area");
    let (width, height) = (size.width(), size.height());

    ImageBuffer::from_fn(width, height, |x, y| {
        let texel = pixels[(height - 1 - y) as usize * width as usize + x as usize];
        Rgb([to_channel(texel.x), to_channel(texel.y), to_channel(texel.z)])
    })
}

pub fn save_screenshot(pixels: &[PodVector], size: FrameBufferSize, path: impl AsRef<Path>) -> Result<(), TracerError> {
    let path = path.as_ref();
    ensure_folders_exist(&path)?;
    to_rgb_image(pixels, size)
        .save(path)
        .map_err(|error| match error {
            image::ImageError::IoError(io_error) => TracerError::Io(io_error),
            other => TracerError::Io(std::io::Error::other(other)),
        })?;
    info!("screenshot saved to {}", path.display());
    Ok(())
}
