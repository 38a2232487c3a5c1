//! Seams between the orchestrator and its platform: the render backend that
//! turns layers into pixels, and the host that schedules frames.

use crate::camera::Camera;
use crate::color::Rgb;
use crate::scene::LayerId;
use glam::Mat4;

/// Per-layer appearance shared by every particle in a batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    pub color: Rgb,
    pub size: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl PointStyle {
    pub fn new(color: Rgb, size: f32) -> Self {
        Self {
            color,
            size,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// One layer's worth of points for the current frame.
///
/// `positions` holds 3 floats per particle; `colors`, when present, holds 3
/// floats per particle and is multiplied with `style.color`. `dirty` is set
/// when buffer contents changed since the previous frame.
#[derive(Clone, Copy, Debug)]
pub struct PointBatch<'a> {
    pub layer: LayerId,
    pub positions: &'a [f32],
    pub colors: Option<&'a [f32]>,
    pub model: Mat4,
    pub style: PointStyle,
    pub dirty: bool,
}

impl PointBatch<'_> {
    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Screen-wide flash overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlashDraw {
    pub layer: LayerId,
    pub color: Rgb,
    pub opacity: f32,
}

pub trait RenderBackend {
    /// Backing size of the render surface, or `None` when there is nothing to
    /// attach to.
    fn surface_size(&self) -> Option<(u32, u32)>;
    fn resize(&mut self, width: u32, height: u32);
    fn begin_frame(&mut self, camera: &Camera, clear: Rgb);
    /// Queue a point layer. Returns true once the batch's instance data is
    /// held by the backend; a dirty buffer stays dirty until then.
    fn draw_points(&mut self, batch: &PointBatch<'_>) -> bool;
    fn draw_flash(&mut self, flash: &FlashDraw);
    fn end_frame(&mut self);
    /// Free any per-layer state for a layer that left the scene.
    fn release_layer(&mut self, _layer: LayerId) {}
    /// Detach from the surface. No frames are drawn afterwards.
    fn detach(&mut self);
}

pub trait FrameHost {
    /// Schedule one more tick on the next display refresh.
    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
    /// Drop host hooks such as the resize listener.
    fn release(&mut self) {}
}
