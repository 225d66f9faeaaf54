use crate::error::TracerError;
use crate::gpu::context::Context;
use log::info;
use std::rc::Rc;
use wgpu::{Adapter, Instance, Trace};

const HEADLESS_DEVICE_LABEL: &str = "Ray Tracer Headless Device";

/// Acquires a high-performance adapter without any surface and opens a device on it.
pub(crate) fn create_headless_context() -> Result<Rc<Context>, TracerError> {
    let instance = Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        ..Default::default()
    });
    let context = pollster::block_on(create_headless_device_async(&instance))?;
    Ok(Rc::new(context))
}

pub(crate) async fn create_headless_device_async(instance: &Instance) -> Result<Context, TracerError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            ..Default::default()
        })
        .await
        .map_err(|error| TracerError::device(format!("failed to request adapter: {error}")))?;

    log_adapter_info(&adapter);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some(HEADLESS_DEVICE_LABEL),
            required_features: wgpu::Features::default(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: Trace::Off,
        })
        .await
        .map_err(|error| TracerError::device(format!("failed to select device: {error}")))?;

    device.set_device_lost_callback(|reason, message| {
        info!("device was lost: {:?}, {}", reason, message);
    });

    Ok(Context::new(device, queue))
}

fn log_adapter_info(adapter: &Adapter) {
    let adapter_info = adapter.get_info();
    info!(
        "Adapter Info:\n\
         Name: {}\n\
         Backend: {:?}\n\
         Vendor: {:#x}\n\
         Device: {:#x}\n\
         Device Type: {:?}\n\
         Driver: {:?}\n\
         Driver Info: {:?}",
        adapter_info.name,
        adapter_info.backend,
        adapter_info.vendor,
        adapter_info.device,
        adapter_info.device_type,
        adapter_info.driver,
        adapter_info.driver_info,
    );
}
