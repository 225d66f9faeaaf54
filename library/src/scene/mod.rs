pub mod camera;
pub mod gpu_scene;
pub mod mesh_warehouse;
pub mod scene_description;
