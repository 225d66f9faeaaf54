use crate::error::TracerError;
use crate::gpu::backend::ComputeBackend;
use crate::gpu::binding_slots::{
    BindingSlot, ResourceKind, FRAME_BUFFERS_GROUP_INDEX, SCENE_GROUP_INDEX, TEXTURES_GROUP_INDEX, TEXTURE_SAMPLER_SLOT, UNIFORMS_GROUP_INDEX,
};
use crate::gpu::compute_pipeline::ComputePipeline;
use crate::gpu::context::Context;
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::frame_uniforms::FrameUniforms;
use crate::gpu::headless_device::create_headless_context;
use crate::gpu::output::frame_buffer_layer::FrameBufferLayer;
use crate::gpu::resources::Resources;
use crate::objects::texture::TextureLayers;
use crate::serialization::pod_vector::PodVector;
use bytemuck::Zeroable;
use cgmath::Vector3;
use log::debug;
use std::collections::BTreeMap;
use std::rc::Rc;
use strum::IntoEnumIterator;

const TRACER_SHADER_SOURCE: &str = include_str!("../../assets/shaders/tracer.wgsl");
const TRACER_ENTRY_POINT: &str = "main";

pub struct WgpuBuffer {
    buffer: Rc<wgpu::Buffer>,
}

pub struct WgpuRenderTarget {
    layer: FrameBufferLayer<PodVector>,
}

pub struct WgpuTextureArray {
    texture: wgpu::Texture,
    view: Rc<wgpu::TextureView>,
}

#[derive(Clone)]
enum Attachment {
    Buffer(Rc<wgpu::Buffer>),
    Textures(Rc<wgpu::TextureView>),
}

impl Attachment {
    #[must_use]
    fn same_as(&self, other: &Attachment) -> bool {
        match (self, other) {
            (Attachment::Buffer(left), Attachment::Buffer(right)) => Rc::ptr_eq(left, right),
            (Attachment::Textures(left), Attachment::Textures(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

/// Drives the tracer kernel through wgpu. Bind groups are rebuilt only when
/// the set of attached resources differs from the one used by the previous dispatch.
pub struct WgpuBackend {
    context: Rc<Context>,
    resources: Resources,
    pipeline: ComputePipeline,
    uniforms: Rc<wgpu::Buffer>,
    sampler: wgpu::Sampler,
    attachments: BTreeMap<BindingSlot, Attachment>,
    groups_built_with: BTreeMap<BindingSlot, Attachment>,
}

impl WgpuBackend {
    pub fn new_headless() -> Result<Self, TracerError> {
        Self::new(create_headless_context()?)
    }

    pub(crate) fn new(context: Rc<Context>) -> Result<Self, TracerError> {
        let resources = Resources::new(context.clone());
        let module = resources.create_shader_module("tracer kernel", TRACER_SHADER_SOURCE)?;
        let pipeline = ComputePipeline::new(context.device(), "tracer pipeline", &module, TRACER_ENTRY_POINT)?;
        let uniforms = resources.create_uniform_buffer("frame uniforms", FrameUniforms::zeroed().as_bytes());
        let sampler = resources.create_sampler("texture sampler");

        let mut attachments = BTreeMap::new();
        attachments.insert(ResourceKind::FrameUniforms.binding_slot(), Attachment::Buffer(uniforms.clone()));

        Ok(Self {
            context,
            resources,
            pipeline,
            uniforms,
            sampler,
            attachments,
            groups_built_with: BTreeMap::new(),
        })
    }

    fn check_everything_attached(&self) -> Result<(), TracerError> {
        match ResourceKind::iter().find(|kind| !self.attachments.contains_key(&kind.binding_slot())) {
            Some(missing) => Err(TracerError::device(format!("nothing is attached for {missing}"))),
            None => Ok(()),
        }
    }

    #[must_use]
    fn groups_are_current(&self) -> bool {
        self.groups_built_with.len() == self.attachments.len()
            && self
                .groups_built_with
                .iter()
                .zip(self.attachments.iter())
                .all(|((built_slot, built), (slot, attached))| built_slot == slot && built.same_as(attached))
    }

    fn rebuild_bind_groups(&mut self) {
        let device = self.context.device();
        for (group, label) in [
            (UNIFORMS_GROUP_INDEX, "uniforms group"),
            (FRAME_BUFFERS_GROUP_INDEX, "frame buffers group"),
            (SCENE_GROUP_INDEX, "scene group"),
            (TEXTURES_GROUP_INDEX, "textures group"),
        ] {
            let attachments = &self.attachments;
            let sampler = &self.sampler;
            self.pipeline.setup_bind_group(group, Some(label), device, |builder| {
                attachments
                    .iter()
                    .filter(|(slot, _)| slot.group() == group)
                    .for_each(|(slot, attachment)| match attachment {
                        Attachment::Buffer(buffer) => {
                            builder.set_buffer_entry(slot.binding(), buffer.clone());
                        }
                        Attachment::Textures(view) => {
                            builder.set_texture_entry(slot.binding(), view.clone());
                        }
                    });
                if group == TEXTURE_SAMPLER_SLOT.group() {
                    builder.set_sampler_entry(TEXTURE_SAMPLER_SLOT.binding(), sampler.clone());
                }
            });
        }
        self.groups_built_with = self.attachments.clone();
        debug!("bind groups rebuilt for {} attachments", self.attachments.len());
    }

    fn attach(&mut self, slot: BindingSlot, attachment: Attachment) -> Result<(), TracerError> {
        if slot == ResourceKind::FrameUniforms.binding_slot() || slot == TEXTURE_SAMPLER_SLOT {
            return Err(TracerError::mismatch(format!("slot {slot:?} is owned by the backend")));
        }
        self.attachments.insert(slot, attachment);
        Ok(())
    }
}

impl ComputeBackend for WgpuBackend {
    type Buffer = WgpuBuffer;
    type RenderTarget = WgpuRenderTarget;
    type TextureArray = WgpuTextureArray;

    fn upload_storage_buffer(&mut self, kind: ResourceKind, bytes: &[u8]) -> Result<Self::Buffer, TracerError> {
        let device = self.context.device();
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let buffer = self.resources.create_storage_buffer_read_only(&kind.to_string(), bytes);
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(TracerError::device(format!("failed to upload {kind}: {error}")));
        }
        Ok(WgpuBuffer { buffer })
    }

    fn release_storage_buffer(&mut self, buffer: Self::Buffer) {
        buffer.buffer.destroy();
    }

    fn attach_storage_buffer(&mut self, slot: BindingSlot, buffer: &Self::Buffer) -> Result<(), TracerError> {
        self.attach(slot, Attachment::Buffer(buffer.buffer.clone()))
    }

    fn upload_texture_array(&mut self, kind: ResourceKind, layers: &TextureLayers<'_>) -> Result<Self::TextureArray, TracerError> {
        let device = self.context.device();
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let texture = self.resources.create_texture_array(&kind.to_string(), layers.width(), layers.height(), layers.layer_count() as u32, &layers.bytes());
        let out_of_memory = pollster::block_on(device.pop_error_scope());
        let invalid = pollster::block_on(device.pop_error_scope());
        if let Some(error) = out_of_memory.or(invalid) {
            return Err(TracerError::device(format!("failed to upload {kind}: {error}")));
        }
        let view = Rc::new(Resources::create_array_view(&texture));
        Ok(WgpuTextureArray { texture, view })
    }

    fn release_texture_array(&mut self, textures: Self::TextureArray) {
        textures.texture.destroy();
    }

    fn attach_texture_array(&mut self, slot: BindingSlot, textures: &Self::TextureArray) -> Result<(), TracerError> {
        self.attach(slot, Attachment::Textures(textures.view.clone()))
    }

    fn create_render_target(&mut self, size: FrameBufferSize) -> Result<Self::RenderTarget, TracerError> {
        let device = self.context.device();
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let layer = FrameBufferLayer::new(device, size, "accumulation");
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(TracerError::device(format!("failed to allocate {}x{} render target: {error}", size.width(), size.height())));
        }
        Ok(WgpuRenderTarget { layer })
    }

    fn release_render_target(&mut self, target: Self::RenderTarget) {
        target.layer.gpu_render_target().destroy();
    }

    fn attach_render_target(&mut self, slot: BindingSlot, target: &Self::RenderTarget) -> Result<(), TracerError> {
        self.attach(slot, Attachment::Buffer(target.layer.gpu_render_target()))
    }

    fn read_render_target(&mut self, target: &Self::RenderTarget) -> Result<Vec<PodVector>, TracerError> {
        let pixels = target.layer.read_to_vec(&self.context)?;
        debug!("read back {} pixels of {:?}", pixels.len(), target.layer.frame_buffer_size());
        Ok(pixels)
    }

    fn detach(&mut self, slot: BindingSlot) {
        if slot != ResourceKind::FrameUniforms.binding_slot() && slot != TEXTURE_SAMPLER_SLOT {
            self.attachments.remove(&slot);
        }
    }

    fn set_frame_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<(), TracerError> {
        self.resources.write_buffer(&self.uniforms, uniforms.as_bytes());
        Ok(())
    }

    fn dispatch(&mut self, work_groups: Vector3<u32>) -> Result<(), TracerError> {
        self.check_everything_attached()?;
        if !self.groups_are_current() {
            self.rebuild_bind_groups();
        }

        let device = self.context.device();
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("tracer dispatch") });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("tracer pass"),
                timestamp_writes: None,
            });
            self.pipeline.set_into_pass(&mut pass);
            pass.dispatch_workgroups(work_groups.x, work_groups.y, work_groups.z);
        }
        self.context.queue().submit(Some(encoder.finish()));

        match pollster::block_on(device.pop_error_scope()) {
            Some(error) => Err(TracerError::device(format!("dispatch failed: {error}"))),
            None => Ok(()),
        }
    }

    fn memory_barrier(&mut self) -> Result<(), TracerError> {
        self.context.wait().map(|_| ())
    }
}
