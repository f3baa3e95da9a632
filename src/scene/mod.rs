//! WebGL scene mode: an orbit camera over colored label boxes.

pub mod camera;
pub mod gl;

use thiserror::Error;

pub use camera::{OrbitCamera, pick};
pub use gl::SceneRenderer;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("webgl context unavailable")]
    NoContext,
    #[error("shader compile failed: {0}")]
    Compile(String),
    #[error("program link failed: {0}")]
    Link(String),
    #[error("gl object allocation failed")]
    Buffer,
    #[error("shader input {0} not found")]
    Missing(&'static str),
}
