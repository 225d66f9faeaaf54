//#![deny(warnings)]

#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::bool_comparison)]
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod objects;
pub mod scene;
pub mod serialization;
pub mod utils;
mod tests;

use crate::config::savepoint::Savepoint;
use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::dispatch_driver::{DispatchDriver, FrameParameters};
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::render_target::RenderTarget;
use crate::gpu::wgpu_backend::WgpuBackend;
use crate::scene::gpu_scene::GpuScene;
use crate::scene::scene_description::SceneDescription;
use crate::serialization::pod_vector::PodVector;
use log::info;
use std::path::Path;
use std::time::Instant;

/// Owns a device-resident scene and its accumulation target, and renders
/// progressively refined frames of it.
pub struct RayTracer<B: ComputeBackend> {
    backend: B,
    scene: GpuScene<B>,
    target: RenderTarget<B>,
    driver: DispatchDriver,
    frames_rendered: u32,
    max_bounces: u32,
}

impl RayTracer<WgpuBackend> {
    pub fn new_headless(description: SceneDescription, size: FrameBufferSize, max_bounces: u32) -> Result<Self, TracerError> {
        Self::with_backend(WgpuBackend::new_headless()?, description, size, max_bounces)
    }
}

impl<B: ComputeBackend> RayTracer<B> {
    #[must_use]
    pub fn get_reasonable_log_filter() -> &'static str {
        "wgpu=warn,naga=warn"
    }

    pub fn with_backend(mut backend: B, description: SceneDescription, size: FrameBufferSize, max_bounces: u32) -> Result<Self, TracerError> {
        let scene = description.build(&mut backend)?;
        let target = match RenderTarget::new(&mut backend, size) {
            Ok(target) => target,
            Err(error) => {
                scene.dispose(&mut backend);
                return Err(error);
            }
        };
        info!("tracer ready: {}x{}, up to {} bounces", size.width(), size.height(), max_bounces);

        Ok(Self {
            backend,
            scene,
            target,
            driver: DispatchDriver::new(),
            frames_rendered: 0,
            max_bounces,
        })
    }

    /// Makes the per-frame random seeds reproducible.
    pub fn reseed(&mut self, seed: u64) {
        self.driver = DispatchDriver::seeded(seed);
    }

    /// Accumulates one more sample per pixel. A failed frame does not advance the counter.
    pub fn render_frame(&mut self) -> Result<(), TracerError> {
        let parameters = FrameParameters {
            size: self.target.size(),
            object_count: self.scene.object_count(),
            sphere_count: self.scene.sphere_count(),
            frame_index: self.frames_rendered,
            max_bounces: self.max_bounces,
        };
        self.driver.compute_frame(&mut self.backend, &mut self.scene, &mut self.target, parameters)?;
        self.frames_rendered += 1;
        Ok(())
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u32 {
        self.frames_rendered
    }

    #[must_use]
    pub fn frame_size(&self) -> FrameBufferSize {
        self.target.size()
    }

    #[must_use]
    pub fn scene(&self) -> &GpuScene<B> {
        &self.scene
    }

    pub fn read_pixels(&mut self) -> Result<Vec<PodVector>, TracerError> {
        self.target.read_pixels(&mut self.backend)
    }

    pub fn save_screenshot(&mut self, path: impl AsRef<Path>) -> Result<(), TracerError> {
        let pixels = self.read_pixels()?;
        utils::screenshot::save_screenshot(&pixels, self.target.size(), path)
    }

    /// Renders until every savepoint has written its screenshot. The first failed frame or
    /// screenshot stops the loop; a savepoint is marked saved only after its file is written.
    pub fn render_until_saved(&mut self, savepoints: &mut [Savepoint]) -> Result<(), TracerError> {
        let started = Instant::now();
        while savepoints.iter().any(|savepoint| !savepoint.saved()) {
            self.render_frame()?;

            let elapsed_seconds = started.elapsed().as_secs_f32();
            for savepoint in savepoints.iter_mut() {
                if !savepoint.ready_to_save(elapsed_seconds, self.frames_rendered) {
                    continue;
                }
                self.save_screenshot(savepoint.path())?;
                info!("savepoint {} reached after {} frames, {:.1}s", savepoint.path().display(), self.frames_rendered, elapsed_seconds);
                savepoint.mark_saved();
            }
        }
        info!("rendered {} frames in {:.1}s", self.frames_rendered, started.elapsed().as_secs_f32());
        Ok(())
    }

    /// Releases the target first, then every scene buffer; the backend is handed back.
    pub fn dispose(mut self) -> B {
        self.target.cleanup(&mut self.backend);
        self.scene.dispose(&mut self.backend);
        self.backend
    }
}

#[cfg(test)]
mod ray_tracer_tests {
    use super::*;
    use crate::geometry::alias::{Point, Vector};
    use crate::config::savepoint::SavepointUnit;
    use crate::gpu::binding_slots::ResourceKind;
    use crate::objects::material::Material;
    use crate::objects::sphere::Sphere;
    use crate::scene::camera::Camera;
    use crate::tests::scaffolding::recording_backend::tests::{BackendCall, RecordingBackend};

    #[must_use]
    fn make_description() -> SceneDescription {
        let camera = Camera::from_degrees(Point::new(0.0, 0.0, 4.0), Point::new(0.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0), 40.0, 4.0, 0.0);
        let mut description = SceneDescription::new(camera);
        let material = description.add_material(&Material::new().with_albedo(0.5, 0.5, 0.5));
        description.add_sphere(Sphere::new(Point::new(0.0, 0.0, 0.0), 1.0, material));
        description
    }

    #[test]
    fn test_frame_counter_advances() {
        let mut system_under_test = RayTracer::with_backend(RecordingBackend::new(), make_description(), FrameBufferSize::new(16, 8), 5).unwrap();
        system_under_test.reseed(7);

        system_under_test.render_frame().unwrap();
        system_under_test.render_frame().unwrap();
        system_under_test.render_frame().unwrap();

        assert_eq!(system_under_test.frames_rendered(), 3);
        let counters: Vec<u32> = system_under_test.backend.uniforms_history().iter().map(|uniforms| uniforms.frame_counter).collect();
        assert_eq!(counters, vec![0, 1, 2]);
        assert!(system_under_test.backend.attached().is_empty());
    }

    #[test]
    fn test_failed_frame_keeps_counter() {
        let mut backend = RecordingBackend::new();
        backend.fail_dispatch();
        let mut system_under_test = RayTracer::with_backend(backend, make_description(), FrameBufferSize::new(16, 8), 5).unwrap();

        let actual = system_under_test.render_frame();

        assert!(matches!(actual, Err(TracerError::DeviceResourceFailure { .. })));
        assert_eq!(system_under_test.frames_rendered(), 0);
        assert!(system_under_test.backend.attached().is_empty());
    }

    #[test]
    fn test_read_pixels() {
        let mut backend = RecordingBackend::new();
        backend.fill_pixels_with(PodVector::new(0.5, 0.25, 1.0));
        let mut system_under_test = RayTracer::with_backend(backend, make_description(), FrameBufferSize::new(4, 2), 1).unwrap();

        let pixels = system_under_test.read_pixels().unwrap();

        assert_eq!(pixels.len(), 8);
        assert_eq!(pixels[7], PodVector::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn test_save_screenshot() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("frame.png");
        let mut system_under_test = RayTracer::with_backend(RecordingBackend::new(), make_description(), FrameBufferSize::new(4, 2), 1).unwrap();

        system_under_test.save_screenshot(&path).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_render_until_saved() {
        let directory = tempfile::tempdir().unwrap();
        let mut savepoints = [
            Savepoint::new(directory.path().join("frame_2.png"), 2.0, SavepointUnit::Frames),
            Savepoint::new(directory.path().join("frame_5.png"), 5.0, SavepointUnit::Frames),
        ];
        let mut system_under_test = RayTracer::with_backend(RecordingBackend::new(), make_description(), FrameBufferSize::new(4, 2), 1).unwrap();

        system_under_test.render_until_saved(&mut savepoints).unwrap();

        assert_eq!(system_under_test.frames_rendered(), 5);
        assert!(savepoints.iter().all(|savepoint| savepoint.saved() && savepoint.path().is_file()));
    }

    #[test]
    fn test_failed_frame_stops_the_loop() {
        let directory = tempfile::tempdir().unwrap();
        let mut savepoints = [Savepoint::new(directory.path().join("frame.png"), 1.0, SavepointUnit::Frames)];
        let mut backend = RecordingBackend::new();
        backend.fail_dispatch();
        let mut system_under_test = RayTracer::with_backend(backend, make_description(), FrameBufferSize::new(4, 2), 1).unwrap();

        let actual = system_under_test.render_until_saved(&mut savepoints);

        assert!(matches!(actual, Err(TracerError::DeviceResourceFailure { .. })));
        assert_eq!(savepoints[0].saved(), false);
        assert_eq!(savepoints[0].path().exists(), false);
    }

    #[test]
    fn test_failed_screenshot_keeps_savepoint_pending() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let mut savepoints = [Savepoint::new(blocker.path().join("frame.png"), 1.0, SavepointUnit::Frames)];
        let mut system_under_test = RayTracer::with_backend(RecordingBackend::new(), make_description(), FrameBufferSize::new(4, 2), 1).unwrap();

        let actual = system_under_test.render_until_saved(&mut savepoints);

        assert!(matches!(actual, Err(TracerError::Io(_))));
        assert_eq!(savepoints[0].saved(), false);
        assert_eq!(system_under_test.frames_rendered(), 1);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let system_under_test = RayTracer::with_backend(RecordingBackend::new(), make_description(), FrameBufferSize::new(4, 2), 1).unwrap();

        let backend = system_under_test.dispose();

        assert_eq!(backend.live_buffers(), 0);
        assert_eq!(backend.live_targets(), 0);
        assert_eq!(backend.live_textures(), 0);
        assert!(backend.calls().ends_with(&[
            BackendCall::ReleaseTarget,
            BackendCall::Release(ResourceKind::Materials),
            BackendCall::Release(ResourceKind::Objects),
            BackendCall::Release(ResourceKind::Spheres),
            BackendCall::Release(ResourceKind::Camera),
            BackendCall::ReleaseTextures(ResourceKind::DiffuseTextures),
            BackendCall::ReleaseTextures(ResourceKind::NormalTextures),
            BackendCall::ReleaseTextures(ResourceKind::ParallaxTextures),
        ]));
    }
}
