use crate::error::TracerError;
use crate::gpu::context::Context;
use crate::objects::texture::BYTES_PER_TEXEL;
use std::rc::Rc;
use wgpu::util::DeviceExt;
use wgpu::BufferUsages;

pub(crate) struct Resources {
    context: Rc<Context>,
}

impl Resources {
    #[must_use]
    pub(crate) fn new(context: Rc<Context>) -> Self {
        Self { context }
    }

    /// Compiles WGSL; validation problems surface as `DeviceResourceFailure`
    /// carrying the compiler's diagnostic.
    pub(crate) fn create_shader_module(&self, label: &str, shader_source_code: &str) -> Result<wgpu::ShaderModule, TracerError> {
        let device = self.context.device();
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source_code.into()),
        });
        match pollster::block_on(device.pop_error_scope()) {
            Some(error) => Err(TracerError::device(format!("shader '{label}' failed to compile: {error}"))),
            None => Ok(module),
        }
    }

    #[must_use]
    pub(crate) fn create_buffer(&self, label: &str, usage: BufferUsages, buffer_data: &[u8]) -> Rc<wgpu::Buffer> {
        let buffer = self.context.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: buffer_data,
            usage,
        });
        Rc::new(buffer)
    }

    #[must_use]
    pub(crate) fn create_uniform_buffer(&self, label: &str, buffer_data: &[u8]) -> Rc<wgpu::Buffer> {
        self.create_buffer(label, BufferUsages::UNIFORM | BufferUsages::COPY_DST, buffer_data)
    }

    #[must_use]
    pub(crate) fn create_storage_buffer_read_only(&self, label: &str, buffer_data: &[u8]) -> Rc<wgpu::Buffer> {
        self.create_buffer(label, BufferUsages::STORAGE, buffer_data)
    }

    pub(crate) fn write_buffer(&self, buffer: &wgpu::Buffer, buffer_data: &[u8]) {
        self.context.queue().write_buffer(buffer, 0, buffer_data);
    }

    /// RGBA8 2D array filled from `texels`, layer after layer, rows top to bottom.
    #[must_use]
    pub(crate) fn create_texture_array(&self, label: &str, width: u32, height: u32, layers: u32, texels: &[u8]) -> wgpu::Texture {
        let size = wgpu::Extent3d { width, height, depth_or_array_layers: layers };
        let texture = self.context.device().create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.context.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * BYTES_PER_TEXEL as u32),
                rows_per_image: Some(height),
            },
            size,
        );
        texture
    }

    #[must_use]
    pub(crate) fn create_array_view(texture: &wgpu::Texture) -> wgpu::TextureView {
        texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        })
    }

    /// Linear filtering, clamped to the edge texel.
    #[must_use]
    pub(crate) fn create_sampler(&self, label: &str) -> wgpu::Sampler {
        self.context.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }
}
