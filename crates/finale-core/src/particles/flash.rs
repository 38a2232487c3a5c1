use crate::color::{hsl_to_rgb, Rgb, WHITE};
use crate::constants::*;
use crate::render::{FlashDraw, RenderBackend};
use crate::scene::{LayerId, LayerKind, Scene};
use crate::signals::FrameSignals;

/// Screen-wide flash and heartbeat glow.
pub struct FlashPlane {
    layer: Option<LayerId>,
    intensity: f32,
    color: Rgb,
    opacity: f32,
}

impl FlashPlane {
    pub fn new(scene: &mut Scene) -> Self {
        Self {
            layer: Some(scene.attach(LayerKind::Flash)),
            intensity: 0.0,
            color: WHITE,
            opacity: 0.0,
        }
    }

    pub fn trigger_flash(&mut self, intensity: f32) {
        if self.layer.is_none() {
            return;
        }
        self.intensity = intensity.clamp(0.0, 1.0);
    }

    pub fn update(&mut self, signals: &FrameSignals) {
        if self.layer.is_none() {
            return;
        }
        self.intensity *= FLASH_DECAY_PER_FRAME;
        let drama = signals.dramatic_intensity.clamp(0.0, 1.0);
        let heartbeat = signals.heartbeat_intensity * drama * FLASH_HEARTBEAT_GAIN;
        let total = (self.intensity + heartbeat).clamp(0.0, 1.0);

        self.color = if drama > FLASH_HUE_INTENSITY {
            hsl_to_rgb(signals.turns(0.5), 1.0, 0.7)
        } else if drama > FLASH_WARM_INTENSITY {
            hsl_to_rgb(0.08 + 0.04 * signals.angle(1.0).sin(), 1.0, 0.6)
        } else {
            WHITE
        };
        self.opacity = total * FLASH_MAX_OPACITY;
    }

    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        let Some(layer) = self.layer else { return };
        if self.opacity <= 1e-3 {
            return;
        }
        backend.draw_flash(&FlashDraw {
            layer,
            color: self.color,
            opacity: self.opacity,
        });
    }

    pub fn dispose(&mut self, scene: &mut Scene) {
        if let Some(layer) = self.layer.take() {
            scene.detach(layer);
            self.intensity = 0.0;
            self.opacity = 0.0;
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.layer.is_none()
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}
