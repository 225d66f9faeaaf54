use crate::error::TracerError;
use wgpu::wgt::{PollStatus, PollType};

pub(crate) struct Context {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl Context {
    #[must_use]
    pub(crate) fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    #[must_use]
    pub(crate) fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[must_use]
    pub(crate) fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Blocks until every submitted command buffer has finished.
    pub(crate) fn wait(&self) -> Result<PollStatus, TracerError> {
        self.device
            .poll(PollType::Wait)
            .map_err(|error| TracerError::device(format!("failed to wait for the queue: {error}")))
    }
}
