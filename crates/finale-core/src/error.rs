use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// No attachment point for the render surface; the scene cannot exist.
    #[error("render surface unavailable")]
    SurfaceUnavailable,
    #[error("invalid scene config: {0}")]
    InvalidConfig(&'static str),
}
