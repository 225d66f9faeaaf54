pub(crate) mod file_system;
pub mod screenshot;
