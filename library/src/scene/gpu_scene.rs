use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::storage_buffer::{BindingState, StorageBuffer};
use crate::gpu::texture_array::TextureArray;

/// Uploaded scene: one storage buffer per scene resource kind, then the
/// diffuse, normal and parallax texture arrays, in binding order.
pub struct GpuScene<B: ComputeBackend> {
    buffers: Vec<StorageBuffer<B>>,
    textures: Vec<TextureArray<B>>,
    object_count: usize,
    sphere_count: usize,
    material_count: usize,
}

impl<B: ComputeBackend> GpuScene<B> {
    #[must_use]
    pub(crate) fn new(
        buffers: Vec<StorageBuffer<B>>,
        textures: Vec<TextureArray<B>>,
        object_count: usize,
        sphere_count: usize,
        material_count: usize,
    ) -> Self {
        assert!(buffers.iter().all(|buffer| buffer.state() == BindingState::Unbound), "scene buffers must arrive unbound");
        assert!(textures.iter().all(|texture| texture.state() == BindingState::Unbound), "texture arrays must arrive unbound");
        Self { buffers, textures, object_count, sphere_count, material_count }
    }

    /// Binds materials, objects, spheres, camera and then the texture arrays.
    pub fn bind_all(&mut self, backend: &mut B) -> Result<(), TracerError> {
        for buffer in self.buffers.iter_mut() {
            buffer.bind(backend)?;
        }
        for texture in self.textures.iter_mut() {
            texture.bind(backend)?;
        }
        Ok(())
    }

    pub fn unbind_all(&mut self, backend: &mut B) {
        for texture in self.textures.iter_mut().rev() {
            texture.unbind(backend);
        }
        for buffer in self.buffers.iter_mut().rev() {
            buffer.unbind(backend);
        }
    }

    pub fn dispose(mut self, backend: &mut B) {
        self.unbind_all(backend);
        for buffer in self.buffers.drain(..) {
            buffer.cleanup(backend);
        }
        for texture in self.textures.drain(..) {
            texture.cleanup(backend);
        }
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    #[must_use]
    pub fn sphere_count(&self) -> usize {
        self.sphere_count
    }

    #[must_use]
    pub fn material_count(&self) -> usize {
        self.material_count
    }

    /// Layers per texture array; every array holds one layer per texture index.
    #[must_use]
    pub fn texture_layer_count(&self) -> usize {
        self.textures.first().map_or(0, |texture| texture.layer_count())
    }
}
