use crate::error::TracerError;
use crate::gpu::binding_slots::{BindingSlot, ResourceKind};
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::frame_uniforms::FrameUniforms;
use crate::objects::texture::TextureLayers;
use crate::serialization::pod_vector::PodVector;
use cgmath::Vector3;

/// Device operations the tracer needs. One render thread drives a backend;
/// handles are released through the backend that created them.
pub trait ComputeBackend {
    type Buffer;
    type RenderTarget;
    type TextureArray;

    fn upload_storage_buffer(&mut self, kind: ResourceKind, bytes: &[u8]) -> Result<Self::Buffer, TracerError>;

    fn release_storage_buffer(&mut self, buffer: Self::Buffer);

    fn attach_storage_buffer(&mut self, slot: BindingSlot, buffer: &Self::Buffer) -> Result<(), TracerError>;

    fn upload_texture_array(&mut self, kind: ResourceKind, layers: &TextureLayers<'_>) -> Result<Self::TextureArray, TracerError>;

    fn release_texture_array(&mut self, textures: Self::TextureArray);

    fn attach_texture_array(&mut self, slot: BindingSlot, textures: &Self::TextureArray) -> Result<(), TracerError>;

    fn create_render_target(&mut self, size: FrameBufferSize) -> Result<Self::RenderTarget, TracerError>;

    fn release_render_target(&mut self, target: Self::RenderTarget);

    fn attach_render_target(&mut self, slot: BindingSlot, target: &Self::RenderTarget) -> Result<(), TracerError>;

    fn read_render_target(&mut self, target: &Self::RenderTarget) -> Result<Vec<PodVector>, TracerError>;

    fn detach(&mut self, slot: BindingSlot);

    fn set_frame_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<(), TracerError>;

    fn dispatch(&mut self, work_groups: Vector3<u32>) -> Result<(), TracerError>;

    /// Returns once writes of every dispatched workgroup are visible to readers.
    fn memory_barrier(&mut self) -> Result<(), TracerError>;
}
