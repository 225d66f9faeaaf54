use crate::gpu::frame_buffer_size::FrameBufferSize;
use wgpu::{BufferAddress, BufferUsages};

pub(super) struct FrameBufferLayerParameters<'a> {
    label: Option<&'a str>,
    size: FrameBufferSize,
    bytes_per_channel: u32,
    channels_count: u32,
    usage: BufferUsages,
}

pub(super) struct FrameBufferLayerParametersBuilder<'a> {
    label: Option<&'a str>,
    frame_buffer_size: Option<FrameBufferSize>,
    bytes_per_channel: Option<u32>,
    channels_count: u32,
    usage: BufferUsages,
}

impl<'a> FrameBufferLayerParametersBuilder<'a> {
    const DEFAULT_CHANNELS_COUNT: u32 = 1;

    #[must_use]
    pub(super) fn new(usage: BufferUsages) -> Self {
        Self {
            label: None,
            frame_buffer_size: None,
            bytes_per_channel: None,
            channels_count: Self::DEFAULT_CHANNELS_COUNT,
            usage,
        }
    }

    pub(super) fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub(super) fn frame_buffer_size(mut self, size: FrameBufferSize) -> Self {
        self.frame_buffer_size = Some(size);
        self
    }

    pub(super) fn bytes_per_channel(mut self, bytes: u32) -> Self {
        assert!(bytes > 0, "channel can't be empty");
        self.bytes_per_channel = Some(bytes);
        self
    }

    pub(super) fn channels_count(mut self, count: u32) -> Self {
        assert!(count > 0, "pixel needs at least one channel");
        self.channels_count = count;
        self
    }

    #[must_use]
    pub(super) fn build(self) -> FrameBufferLayerParameters<'a> {
        let Some(size) = self.frame_buffer_size else {
            panic!("frame buffer size is required");
        };
        let Some(bytes_per_channel) = self.bytes_per_channel else {
            panic!("channel size in bytes is required");
        };
        FrameBufferLayerParameters {
            label: self.label,
            size,
            bytes_per_channel,
            channels_count: self.channels_count,
            usage: self.usage,
        }
    }
}

#[must_use]
pub(super) fn frame_buffer_layer_size_bytes(parameters: &FrameBufferLayerParameters) -> BufferAddress {
    parameters.size.area() as BufferAddress * parameters.channels_count as BufferAddress * parameters.bytes_per_channel as BufferAddress
}

#[must_use]
pub(super) fn create_frame_buffer_layer(device: &wgpu::Device, parameters: &FrameBufferLayerParameters) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: parameters.label,
        usage: parameters.usage,
        size: frame_buffer_layer_size_bytes(parameters),
        mapped_at_creation: false,
    })
}
