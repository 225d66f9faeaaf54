#[cfg(test)]
pub(crate) mod tests {
    use crate::error::TracerError;
    use crate::gpu::backend::ComputeBackend;
    use crate::gpu::binding_slots::{BindingSlot, ResourceKind};
    use crate::gpu::frame_buffer_size::FrameBufferSize;
    use crate::gpu::frame_uniforms::FrameUniforms;
    use crate::objects::texture::TextureLayers;
    use crate::serialization::pod_vector::PodVector;
    use cgmath::Vector3;
    use std::collections::BTreeSet;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum BackendCall {
        Upload(ResourceKind, usize),
        Release(ResourceKind),
        UploadTextures(ResourceKind, usize),
        ReleaseTextures(ResourceKind),
        Attach(BindingSlot),
        Detach(BindingSlot),
        CreateTarget(FrameBufferSize),
        ReleaseTarget,
        ReadTarget,
        Uniforms(FrameUniforms),
        Dispatch(Vector3<u32>),
        Barrier,
    }

    #[derive(Debug)]
    pub(crate) struct FakeBuffer {
        kind: ResourceKind,
        bytes: Vec<u8>,
    }

    impl FakeBuffer {
        #[must_use]
        pub(crate) fn bytes(&self) -> &[u8] {
            &self.bytes
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct FakeTextureArray {
        kind: ResourceKind,
        width: u32,
        height: u32,
        texels: Vec<u8>,
    }

    impl FakeTextureArray {
        #[must_use]
        pub(crate) fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        #[must_use]
        pub(crate) fn texels(&self) -> &[u8] {
            &self.texels
        }
    }

    #[derive(Debug)]
    pub(crate) struct FakeTarget {
        size: FrameBufferSize,
    }

    /// Records every device call in order; failures are injected per operation.
    pub(crate) struct RecordingBackend {
        calls: Vec<BackendCall>,
        uploads: Vec<(ResourceKind, Vec<u8>)>,
        texture_uploads: Vec<FakeTextureArray>,
        attached: BTreeSet<BindingSlot>,
        live_buffers: usize,
        live_textures: usize,
        live_targets: usize,
        uploads_before_failure: Option<usize>,
        failing_attach: Option<BindingSlot>,
        fail_dispatch: bool,
        pixel: PodVector,
    }

    impl RecordingBackend {
        #[must_use]
        pub(crate) fn new() -> Self {
            Self {
                calls: Vec::new(),
                uploads: Vec::new(),
                texture_uploads: Vec::new(),
                attached: BTreeSet::new(),
                live_buffers: 0,
                live_textures: 0,
                live_targets: 0,
                uploads_before_failure: None,
                failing_attach: None,
                fail_dispatch: false,
                pixel: PodVector::default(),
            }
        }

        pub(crate) fn fail_uploads_after(&mut self, successful_uploads: usize) {
            self.uploads_before_failure = Some(successful_uploads);
        }

        pub(crate) fn fail_attach_of(&mut self, slot: BindingSlot) {
            self.failing_attach = Some(slot);
        }

        pub(crate) fn fail_dispatch(&mut self) {
            self.fail_dispatch = true;
        }

        pub(crate) fn fill_pixels_with(&mut self, pixel: PodVector) {
            self.pixel = pixel;
        }

        #[must_use]
        pub(crate) fn calls(&self) -> &[BackendCall] {
            &self.calls
        }

        pub(crate) fn clear_calls(&mut self) {
            self.calls.clear();
        }

        #[must_use]
        pub(crate) fn uploaded(&self, kind: ResourceKind) -> Option<&[u8]> {
            self.uploads.iter().rev().find(|(uploaded_kind, _)| *uploaded_kind == kind).map(|(_, bytes)| bytes.as_slice())
        }

        #[must_use]
        pub(crate) fn uploaded_textures(&self, kind: ResourceKind) -> Option<&FakeTextureArray> {
            self.texture_uploads.iter().rev().find(|textures| textures.kind == kind)
        }

        #[must_use]
        pub(crate) fn attached(&self) -> &BTreeSet<BindingSlot> {
            &self.attached
        }

        #[must_use]
        pub(crate) fn live_buffers(&self) -> usize {
            self.live_buffers
        }

        #[must_use]
        pub(crate) fn live_textures(&self) -> usize {
            self.live_textures
        }

        #[must_use]
        pub(crate) fn live_targets(&self) -> usize {
            self.live_targets
        }

        #[must_use]
        fn consume_upload(&mut self, kind: ResourceKind) -> Result<(), TracerError> {
            if let Some(remaining) = self.uploads_before_failure {
                if remaining == 0 {
                    return Err(TracerError::device(format!("injected upload failure for {kind}")));
                }
                self.uploads_before_failure = Some(remaining - 1);
            }
            Ok(())
        }

        fn attach(&mut self, slot: BindingSlot) -> Result<(), TracerError> {
            if self.failing_attach == Some(slot) {
                return Err(TracerError::device(format!("injected attach failure at {slot:?}")));
            }
            self.calls.push(BackendCall::Attach(slot));
            self.attached.insert(slot);
            Ok(())
        }

        #[must_use]
        pub(crate) fn uniforms_history(&self) -> Vec<FrameUniforms> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    BackendCall::Uniforms(uniforms) => Some(*uniforms),
                    _ => None,
                })
                .collect()
        }
    }

    impl ComputeBackend for RecordingBackend {
        type Buffer = FakeBuffer;
        type RenderTarget = FakeTarget;
        type TextureArray = FakeTextureArray;

        fn upload_storage_buffer(&mut self, kind: ResourceKind, bytes: &[u8]) -> Result<Self::Buffer, TracerError> {
            self.consume_upload(kind)?;
            self.calls.push(BackendCall::Upload(kind, bytes.len()));
            self.uploads.push((kind, bytes.to_vec()));
            self.live_buffers += 1;
            Ok(FakeBuffer { kind, bytes: bytes.to_vec() })
        }

        fn release_storage_buffer(&mut self, buffer: Self::Buffer) {
            self.calls.push(BackendCall::Release(buffer.kind));
            self.live_buffers -= 1;
        }

        fn attach_storage_buffer(&mut self, slot: BindingSlot, _buffer: &Self::Buffer) -> Result<(), TracerError> {
            self.attach(slot)
        }

        fn upload_texture_array(&mut self, kind: ResourceKind, layers: &TextureLayers<'_>) -> Result<Self::TextureArray, TracerError> {
            self.consume_upload(kind)?;
            self.calls.push(BackendCall::UploadTextures(kind, layers.layer_count()));
            let textures = FakeTextureArray { kind, width: layers.width(), height: layers.height(), texels: layers.bytes() };
            self.texture_uploads.push(textures.clone());
            self.live_textures += 1;
            Ok(textures)
        }

        fn release_texture_array(&mut self, textures: Self::TextureArray) {
            self.calls.push(BackendCall::ReleaseTextures(textures.kind));
            self.live_textures -= 1;
        }

        fn attach_texture_array(&mut self, slot: BindingSlot, _textures: &Self::TextureArray) -> Result<(), TracerError> {
            self.attach(slot)
        }

        fn create_render_target(&mut self, size: FrameBufferSize) -> Result<Self::RenderTarget, TracerError> {
            self.calls.push(BackendCall::CreateTarget(size));
            self.live_targets += 1;
            Ok(FakeTarget { size })
        }

        fn release_render_target(&mut self, _target: Self::RenderTarget) {
            self.calls.push(BackendCall::ReleaseTarget);
            self.live_targets -= 1;
        }

        fn attach_render_target(&mut self, slot: BindingSlot, _target: &Self::RenderTarget) -> Result<(), TracerError> {
            self.attach(slot)
        }

        fn read_render_target(&mut self, target: &Self::RenderTarget) -> Result<Vec<PodVector>, TracerError> {
            self.calls.push(BackendCall::ReadTarget);
            Ok(vec![self.pixel; target.size.area()])
        }

        fn detach(&mut self, slot: BindingSlot) {
            self.calls.push(BackendCall::Detach(slot));
            self.attached.remove(&slot);
        }

        fn set_frame_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<(), TracerError> {
            self.calls.push(BackendCall::Uniforms(*uniforms));
            Ok(())
        }

        fn dispatch(&mut self, work_groups: Vector3<u32>) -> Result<(), TracerError> {
            if self.fail_dispatch {
                return Err(TracerError::device("injected dispatch failure"));
            }
            self.calls.push(BackendCall::Dispatch(work_groups));
            Ok(())
        }

        fn memory_barrier(&mut self) -> Result<(), TracerError> {
            self.calls.push(BackendCall::Barrier);
            Ok(())
        }
    }
}
