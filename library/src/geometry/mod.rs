pub mod alias;
pub mod transform;
pub mod aabb;
pub(crate) mod fundamental_constants;
