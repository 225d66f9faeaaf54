pub(crate) mod scaffolding;

mod render;
mod test_scene_upload;
