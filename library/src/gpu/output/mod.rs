pub(crate) mod frame_buffer_layer;
mod utils;
