pub mod material;
pub mod material_index;
pub mod mesh;
pub mod sphere;
pub mod texture;
