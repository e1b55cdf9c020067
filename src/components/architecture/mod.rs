mod component;
pub mod dataset;
mod gesture;
mod highlight;
mod render;
mod state;
mod types;
mod viewport;

pub use component::ArchitectureMap;
pub use dataset::platform_architecture;
