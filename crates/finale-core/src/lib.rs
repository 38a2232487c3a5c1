pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod easing;
pub mod error;
pub mod orchestrator;
pub mod particles;
pub mod render;
pub mod scene;
pub mod signals;
pub mod smoothing;

pub use camera::Camera;
pub use config::SceneConfig;
pub use countdown::{calculate_state, debug_state, CountdownDisplay, CountdownState, Phase};
pub use error::SceneError;
pub use orchestrator::Orchestrator;
pub use render::{FlashDraw, FrameHost, PointBatch, PointStyle, RenderBackend};
pub use scene::{LayerId, LayerKind, Scene};
pub use signals::FrameSignals;
pub use smoothing::smooth_lerp;
