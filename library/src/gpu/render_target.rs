use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::binding_slots::ResourceKind;
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::storage_buffer::BindingState;
use crate::serialization::pod_vector::PodVector;

/// Accumulation image the kernel writes one RGBA float quartet per pixel into.
pub struct RenderTarget<B: ComputeBackend> {
    handle: B::RenderTarget,
    size: FrameBufferSize,
    state: BindingState,
}

impl<B: ComputeBackend> RenderTarget<B> {
    pub fn new(backend: &mut B, size: FrameBufferSize) -> Result<Self, TracerError> {
        let handle = backend.create_render_target(size)?;
        Ok(Self { handle, size, state: BindingState::Unbound })
    }

    pub fn bind(&mut self, backend: &mut B) -> Result<(), TracerError> {
        if self.state == BindingState::Bound {
            return Ok(());
        }
        backend.attach_render_target(ResourceKind::RenderTarget.binding_slot(), &self.handle)?;
        self.state = BindingState::Bound;
        Ok(())
    }

    pub fn unbind(&mut self, backend: &mut B) {
        if self.state == BindingState::Unbound {
            return;
        }
        backend.detach(ResourceKind::RenderTarget.binding_slot());
        self.state = BindingState::Unbound;
    }

    /// Pixels in row-major order, first row at the bottom of the image.
    pub fn read_pixels(&self, backend: &mut B) -> Result<Vec<PodVector>, TracerError> {
        let pixels = backend.read_render_target(&self.handle)?;
        if pixels.len() != self.size.area() {
            return Err(TracerError::device(format!(
                "render target returned {} pixels, expected {}",
                pixels.len(),
                self.size.area()
            )));
        }
        Ok(pixels)
    }

    pub fn cleanup(mut self, backend: &mut B) {
        self.unbind(backend);
        backend.release_render_target(self.handle);
    }

    #[must_use]
    pub fn size(&self) -> FrameBufferSize {
        self.size
    }

    #[must_use]
    pub fn state(&self) -> BindingState {
        self.state
    }
}
