use crate::config::savepoint::Savepoint;
use crate::error::TracerError;
use crate::geometry::alias::{Point, Vector};
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::scene::camera::Camera;
use cgmath::InnerSpace;
use log::info;
use serde::Deserialize;
use std::path::Path;

const PARALLEL_TOLERANCE: f32 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct RenderQuality {
    pub width: u32,
    pub height: u32,
    pub bounces: u32,
}

impl RenderQuality {
    pub fn frame_size(&self) -> Result<FrameBufferSize, TracerError> {
        FrameBufferSize::checked(self.width, self.height)
    }
}

/// Camera as written in the file: positions as triples, angles in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct CameraConfig {
    pub origin: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    pub fov: f32,
    pub focus_dist: f32,
    pub defocus_angle: f32,
}

impl CameraConfig {
    pub fn to_camera(&self) -> Result<Camera, TracerError> {
        let mut numbers = self.origin.iter().chain(&self.look_at).chain(&self.up).chain([&self.fov, &self.focus_dist, &self.defocus_angle]);
        if numbers.any(|number| !number.is_finite()) {
            return Err(TracerError::configuration("camera values must be finite"));
        }
        let direction = Point::from(self.look_at) - Point::from(self.origin);
        if direction.magnitude2() <= 0.0 {
            return Err(TracerError::configuration("camera origin and look_at coincide"));
        }
        let up = Vector::from(self.up);
        if up.magnitude2() <= 0.0 {
            return Err(TracerError::configuration("camera up vector is zero"));
        }
        if direction.normalize().cross(up.normalize()).magnitude2() < PARALLEL_TOLERANCE {
            return Err(TracerError::configuration("camera up vector is parallel to the view direction"));
        }
        if self.fov <= 0.0 || self.focus_dist <= 0.0 {
            return Err(TracerError::configuration(format!("camera fov ({}) and focus distance ({}) must be positive", self.fov, self.focus_dist)));
        }
        Ok(Camera::from_degrees(
            Point::from(self.origin),
            Point::from(self.look_at),
            Vector::from(self.up),
            self.fov,
            self.focus_dist,
            self.defocus_angle,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub savepoints: Vec<Savepoint>,
    pub quality: RenderQuality,
    pub camera: CameraConfig,
}

impl RenderConfig {
    pub fn from_json(text: &str) -> Result<Self, TracerError> {
        let config: RenderConfig = serde_json::from_str(text)
            .map_err(|error| TracerError::configuration(format!("invalid render configuration: {error}")))?;
        config.quality.frame_size()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TracerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|error| TracerError::configuration(format!("failed to read {}: {error}", path.display())))?;
        let config = Self::from_json(&text)?;
        info!(
            "render configuration loaded from {}: {}x{}, {} bounces, {} savepoints",
            path.display(),
            config.quality.width,
            config.quality.height,
            config.quality.bounces,
            config.savepoints.len(),
        );
        Ok(config)
    }
}
