//! Drawing surface abstraction
//!
//! The simulation issues abstract draw calls against a [`Surface`]; how pixels
//! are produced is the backend's business. [`DrawList`] is a recording backend
//! used by the headless binary and by tests.

pub mod colors;
pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::DVec2;

use crate::consts::OFFSCREEN_MARGIN;
use crate::error::AssetError;

/// Linear RGBA color
pub type Rgba = [f32; 4];

/// Blend mode for filled primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    /// Additive glow (sparks)
    Additive,
}

/// Drawing backend consumed by entity render methods
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Draw a named sprite centered at `center`, scaled so its larger side
    /// equals `size`, rotated by `rotation` radians.
    fn draw_sprite(
        &mut self,
        sprite: &str,
        center: DVec2,
        size: f64,
        rotation: f64,
    ) -> Result<(), AssetError>;

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, blend: BlendMode);

    fn fill_rect(&mut self, center: DVec2, half_extents: DVec2, rotation: f64, color: Rgba);

    fn stroke_circle(&mut self, center: DVec2, radius: f64, line_width: f64, color: Rgba);

    fn stroke_polyline(&mut self, points: &[DVec2], line_width: f64, color: Rgba);

    /// Whether something of the given extent around `center` could be visible
    fn is_visible(&self, center: DVec2, extent: f64) -> bool {
        center.x + extent >= -OFFSCREEN_MARGIN
            && center.x - extent <= self.width() + OFFSCREEN_MARGIN
            && center.y + extent >= -OFFSCREEN_MARGIN
            && center.y - extent <= self.height() + OFFSCREEN_MARGIN
    }
}

/// Draw a sprite, or a flat placeholder disc when the sprite is unavailable
pub fn sprite_or_placeholder(
    surface: &mut dyn Surface,
    sprite: &str,
    center: DVec2,
    size: f64,
    rotation: f64,
    placeholder: Rgba,
) {
    if surface.draw_sprite(sprite, center, size, rotation).is_err() {
        surface.fill_circle(center, size / 2.0, placeholder, BlendMode::Normal);
    }
}

/// Replace the alpha channel of a color
#[inline]
pub fn with_alpha(color: Rgba, alpha: f64) -> Rgba {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0) as f32]
}
