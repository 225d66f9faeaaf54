pub mod backend;
pub mod binding_slots;
pub mod dispatch_driver;
pub mod frame_buffer_size;
pub mod frame_uniforms;
pub mod render_target;
pub mod storage_buffer;
pub mod texture_array;
pub mod wgpu_backend;

pub(crate) mod bind_group_builder;
pub(crate) mod compute_pipeline;
pub(crate) mod context;
pub(crate) mod headless_device;
pub(crate) mod output;
pub(crate) mod resources;

mod binding_groups;
