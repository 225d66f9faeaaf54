pub mod render_config;
pub mod savepoint;
