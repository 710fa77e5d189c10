pub mod api;
pub mod builder;
pub mod ds;
pub mod loader;
