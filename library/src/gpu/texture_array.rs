use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::binding_slots::ResourceKind;
use crate::gpu::storage_buffer::BindingState;
use crate::objects::texture::TextureLayers;
use log::debug;

/// Device-resident texture array, attached at its kind's slot next to the shared sampler.
pub struct TextureArray<B: ComputeBackend> {
    kind: ResourceKind,
    handle: B::TextureArray,
    layer_count: usize,
    state: BindingState,
}

impl<B: ComputeBackend> TextureArray<B> {
    pub fn new(backend: &mut B, kind: ResourceKind, layers: &TextureLayers<'_>) -> Result<Self, TracerError> {
        assert!(kind.is_texture_array(), "{kind} is not a texture array");

        let handle = backend.upload_texture_array(kind, layers)?;
        debug!("uploaded {} layers of {}x{} {}", layers.layer_count(), layers.width(), layers.height(), kind);

        Ok(Self {
            kind,
            handle,
            layer_count: layers.layer_count(),
            state: BindingState::Unbound,
        })
    }

    pub fn bind(&mut self, backend: &mut B) -> Result<(), TracerError> {
        if self.state == BindingState::Bound {
            return Ok(());
        }
        backend.attach_texture_array(self.kind.binding_slot(), &self.handle)?;
        self.state = BindingState::Bound;
        Ok(())
    }

    pub fn unbind(&mut self, backend: &mut B) {
        if self.state == BindingState::Unbound {
            return;
        }
        backend.detach(self.kind.binding_slot());
        self.state = BindingState::Unbound;
    }

    pub fn cleanup(mut self, backend: &mut B) {
        self.unbind(backend);
        backend.release_texture_array(self.handle);
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    #[must_use]
    pub fn state(&self) -> BindingState {
        self.state
    }
}
