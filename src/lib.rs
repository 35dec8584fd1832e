pub mod app;
pub mod camera;
pub mod cli;
pub mod core;
pub mod loaders;
pub mod renderer;
pub mod scene;
pub mod types;

pub use camera::{Camera, CameraMovement};
pub use scene::{SceneConfig, SceneObject};
