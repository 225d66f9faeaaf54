use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::binding_slots::ResourceKind;
use crate::serialization::packed_buffer::PackedBuffer;
use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
}

/// Device-resident copy of one packed scene buffer, attached at its kind's slot.
pub struct StorageBuffer<B: ComputeBackend> {
    kind: ResourceKind,
    handle: B::Buffer,
    size_bytes: usize,
    state: BindingState,
}

impl<B: ComputeBackend> StorageBuffer<B> {
    /// Uploads `packed` once; the host copy is dropped afterwards.
    pub fn new(backend: &mut B, kind: ResourceKind, packed: PackedBuffer) -> Result<Self, TracerError> {
        assert!(kind.is_scene_buffer(), "{kind} is not a scene buffer");

        let handle = backend.upload_storage_buffer(kind, packed.bytes())?;
        debug!("uploaded {} bytes of {}", packed.len(), kind);

        Ok(Self {
            kind,
            handle,
            size_bytes: packed.len(),
            state: BindingState::Unbound,
        })
    }

    pub fn bind(&mut self, backend: &mut B) -> Result<(), TracerError> {
        if self.state == BindingState::Bound {
            return Ok(());
        }
        backend.attach_storage_buffer(self.kind.binding_slot(), &self.handle)?;
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
        backend.release_storage_buffer(self.handle);
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    #[must_use]
    pub fn state(&self) -> BindingState {
        self.state
    }
}
