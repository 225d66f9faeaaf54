use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::frame_uniforms::FrameUniforms;
use crate::gpu::render_target::RenderTarget;
use crate::scene::gpu_scene::GpuScene;
use cgmath::{Vector2, Vector3};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const WORK_GROUP_SIZE: Vector2<u32> = Vector2::new(8, 4);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameParameters {
    pub size: FrameBufferSize,
    pub object_count: usize,
    pub sphere_count: usize,
    pub frame_index: u32,
    pub max_bounces: u32,
}

/// Issues one progressive-accumulation dispatch per frame.
pub struct DispatchDriver<R: Rng = StdRng> {
    random: R,
}

impl DispatchDriver<StdRng> {
    #[must_use]
    pub fn new() -> Self {
        Self { random: StdRng::from_entropy() }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { random: StdRng::seed_from_u64(seed) }
    }
}

impl Default for DispatchDriver<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> DispatchDriver<R> {
    #[must_use]
    pub fn with_rng(random: R) -> Self {
        Self { random }
    }

    #[must_use]
    pub fn work_groups(size: FrameBufferSize) -> Vector3<u32> {
        let count = size.work_groups_count(WORK_GROUP_SIZE);
        Vector3::new(count.x, count.y, 1)
    }

    /// Runs binds, uniforms, dispatch and barrier, then unbinds in reverse order.
    /// A failing step ends the frame right away; bindings are still released.
    pub fn compute_frame<B: ComputeBackend>(
        &mut self,
        backend: &mut B,
        scene: &mut GpuScene<B>,
        target: &mut RenderTarget<B>,
        parameters: FrameParameters,
    ) -> Result<(), TracerError> {
        assert_eq!(parameters.size, target.size(), "frame size differs from the render target size");

        let outcome = self.bind_and_dispatch(backend, scene, target, &parameters);

        target.unbind(backend);
        scene.unbind_all(backend);

        outcome
    }

    fn bind_and_dispatch<B: ComputeBackend>(
        &mut self,
        backend: &mut B,
        scene: &mut GpuScene<B>,
        target: &mut RenderTarget<B>,
        parameters: &FrameParameters,
    ) -> Result<(), TracerError> {
        scene.bind_all(backend)?;
        target.bind(backend)?;

        let uniforms = FrameUniforms::new(
            parameters.size,
            parameters.object_count as u32,
            parameters.sphere_count as u32,
            parameters.frame_index,
            parameters.max_bounces,
            self.random.r#gen::<f32>(),
        );
        backend.set_frame_uniforms(&uniforms)?;

        let work_groups = Self::work_groups(parameters.size);
        trace!("frame {}: dispatching {}x{}x{} work groups", parameters.frame_index, work_groups.x, work_groups.y, work_groups.z);
        backend.dispatch(work_groups)?;

        backend.memory_barrier()
    }
}
