pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod daycycle;
pub mod error;

pub use camera::Camera;
pub use config::{NoiseParams, SceneConfig, ScenePreset};
pub use controller::{CameraController, Key, KeyState};
pub use daycycle::DayCycle;
pub use error::LucernaError;
