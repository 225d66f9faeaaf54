use crate::error::TracerError;
use crate::gpu::context::Context;
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::output::utils::{create_frame_buffer_layer, frame_buffer_layer_size_bytes, FrameBufferLayerParameters, FrameBufferLayerParametersBuilder};
use bytemuck::{AnyBitPattern, Pod};
use futures_intrusive::channel::shared::oneshot_channel;
use std::marker::PhantomData;
use std::rc::Rc;
use wgpu::{BufferAddress, BufferUsages, CommandEncoder};

/// Device-side per-pixel buffer paired with a host-mappable copy for readback.
pub(crate) struct FrameBufferLayer<T: Sized + AnyBitPattern + Pod> {
    gpu_located_render_target: Rc<wgpu::Buffer>,
    cpu_mappable_mediator: wgpu::Buffer,
    buffer_size_bytes: BufferAddress,
    frame_buffer_size: FrameBufferSize,

    _marker: PhantomData<T>,
}

impl<T: Sized + AnyBitPattern + Pod> FrameBufferLayer<T> {
    const LABEL_GPU_LOCATED_RENDER_TARGET: &'static str = " render target";
    const LABEL_CPU_MAPPABLE_MEDIATOR: &'static str = " cpu mappable mediator";

    #[must_use]
    pub(crate) fn new(device: &wgpu::Device, frame_buffer_size: FrameBufferSize, marker: &str) -> Self {
        let render_target_usage = BufferUsages::STORAGE | BufferUsages::COPY_SRC;
        let render_target_label = format!("{}{}", marker, Self::LABEL_GPU_LOCATED_RENDER_TARGET);
        let parameters_gpu_located_render_target = Self::parameters(frame_buffer_size, render_target_usage, render_target_label.as_str());
        let gpu_located_copy = create_frame_buffer_layer(device, &parameters_gpu_located_render_target);

        let mediator_usage = BufferUsages::MAP_READ | BufferUsages::COPY_DST;
        let mediator_label = format!("{}{}", marker, Self::LABEL_CPU_MAPPABLE_MEDIATOR);
        let parameters_cpu_mappable_mediator = Self::parameters(frame_buffer_size, mediator_usage, mediator_label.as_str());
        let cpu_mappable_mediator = create_frame_buffer_layer(device, &parameters_cpu_mappable_mediator);

        let buffer_size_bytes: BufferAddress = frame_buffer_layer_size_bytes(&parameters_cpu_mappable_mediator);
        debug_assert_eq!(buffer_size_bytes, frame_buffer_layer_size_bytes(&parameters_gpu_located_render_target));

        Self {
            gpu_located_render_target: Rc::new(gpu_located_copy),
            cpu_mappable_mediator,
            buffer_size_bytes,
            frame_buffer_size,

            _marker: PhantomData,
        }
    }

    #[must_use]
    pub(crate) fn gpu_render_target(&self) -> Rc<wgpu::Buffer> {
        self.gpu_located_render_target.clone()
    }

    #[must_use]
    pub(crate) fn frame_buffer_size(&self) -> FrameBufferSize {
        self.frame_buffer_size
    }

    const ZERO_SOURCE_OFFSET: BufferAddress = 0;
    const ZERO_DESTINATION_OFFSET: BufferAddress = 0;

    pub(crate) fn issue_copy_to_cpu_mediator(&self, encoder: &mut CommandEncoder) {
        encoder.copy_buffer_to_buffer(
            &self.gpu_located_render_target,
            Self::ZERO_SOURCE_OFFSET,
            &self.cpu_mappable_mediator,
            Self::ZERO_DESTINATION_OFFSET,
            self.buffer_size_bytes,
        );
    }

    pub(crate) fn read_cpu_mediator<ConsumeData: FnOnce(&[T])>(&self, consume: ConsumeData) -> impl Future<Output = Result<(), TracerError>> {
        let cpu_mediator_slice = self.cpu_mappable_mediator.slice(..);

        let (sender, receiver) = oneshot_channel();
        cpu_mediator_slice.map_async(wgpu::MapMode::Read, move |result| {
            // the receiver is gone only when the read future was dropped
            let _ = sender.send(result);
        });

        async move {
            match receiver.receive().await {
                Some(Ok(())) => {}
                Some(Err(error)) => return Err(TracerError::device(format!("failed to map the readback buffer: {error}"))),
                None => return Err(TracerError::device("readback buffer mapping was abandoned")),
            }
            {
                let raw_data = cpu_mediator_slice.get_mapped_range();
                let texels: &[T] = bytemuck::cast_slice(&raw_data);
                consume(texels);
            }

            self.cpu_mappable_mediator.unmap();
            Ok(())
        }
    }

    /// Copies the device buffer to the host, blocking until the copy is readable.
    pub(crate) fn read_to_vec(&self, context: &Context) -> Result<Vec<T>, TracerError> {
        let mut encoder = context.device().create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("render target readback") });
        self.issue_copy_to_cpu_mediator(&mut encoder);
        context.queue().submit(Some(encoder.finish()));

        let mut texels = Vec::new();
        let read = self.read_cpu_mediator(|data| texels.extend_from_slice(data));
        context.wait()?;
        pollster::block_on(read)?;

        Ok(texels)
    }

    #[must_use]
    fn parameters(frame_buffer_size: FrameBufferSize, usage: BufferUsages, label: &str) -> FrameBufferLayerParameters<'_> {
        FrameBufferLayerParametersBuilder::new(usage)
            .label(label)
            .frame_buffer_size(frame_buffer_size)
            .bytes_per_channel(size_of::<T>() as u32)
            .channels_count(1)
            .build()
    }
}
