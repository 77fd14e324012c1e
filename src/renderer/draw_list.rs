//! Recording surface
//!
//! Stores every draw call as a [`DrawCommand`] instead of rasterizing it. An
//! optional atlas restricts which sprites resolve; anything else is reported
//! missing once and then silently refused.

use std::collections::BTreeSet;

use glam::DVec2;

use super::{BlendMode, Rgba, Surface};
use crate::error::AssetError;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        name: String,
        center: DVec2,
        size: f64,
        rotation: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
        blend: BlendMode,
    },
    Rect {
        center: DVec2,
        half_extents: DVec2,
        rotation: f64,
        color: Rgba,
    },
    Ring {
        center: DVec2,
        radius: f64,
        line_width: f64,
        color: Rgba,
    },
    Polyline {
        points: Vec<DVec2>,
        line_width: f64,
        color: Rgba,
    },
}

#[derive(Debug, Clone)]
pub struct DrawList {
    width: f64,
    height: f64,
    /// `None` resolves every sprite
    atlas: Option<BTreeSet<String>>,
    missing: BTreeSet<String>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Surface on which every sprite resolves
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            atlas: None,
            missing: BTreeSet::new(),
            commands: Vec::new(),
        }
    }

    /// Surface that only resolves the named sprites
    pub fn with_atlas<I, S>(width: f64, height: f64, sprites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            atlas: Some(sprites.into_iter().map(Into::into).collect()),
            ..Self::new(width, height)
        }
    }

    /// Drop recorded commands (start of a new frame)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Sprite names that failed to resolve so far
    pub fn missing_sprites(&self) -> impl Iterator<Item = &str> {
        self.missing.iter().map(String::as_str)
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn draw_sprite(
        &mut self,
        sprite: &str,
        center: DVec2,
        size: f64,
        rotation: f64,
    ) -> Result<(), AssetError> {
        if let Some(atlas) = &self.atlas {
            if !atlas.contains(sprite) {
                if self.missing.insert(sprite.to_string()) {
                    log::warn!("Sprite not in atlas: {sprite}");
                }
                return Err(AssetError::MissingSprite(sprite.to_string()));
            }
        }
        self.commands.push(DrawCommand::Sprite {
            name: sprite.to_string(),
            center,
            size,
            rotation,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, blend: BlendMode) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            blend,
        });
    }

    fn fill_rect(&mut self, center: DVec2, half_extents: DVec2, rotation: f64, color: Rgba) {
        self.commands.push(DrawCommand::Rect {
            center,
            half_extents,
            rotation,
            color,
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, line_width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            line_width,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], line_width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            line_width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{colors, sprite_or_placeholder};

    #[test]
    fn test_missing_sprite_falls_back_to_placeholder() {
        let mut list = DrawList::with_atlas(800.0, 600.0, ["ship.png"]);
        sprite_or_placeholder(
            &mut list,
            "ghost.png",
            DVec2::new(10.0, 10.0),
            20.0,
            0.0,
            colors::PLACEHOLDER_SHIP,
        );
        sprite_or_placeholder(
            &mut list,
            "ship.png",
            DVec2::new(10.0, 10.0),
            20.0,
            0.0,
            colors::PLACEHOLDER_SHIP,
        );
        assert_eq!(list.sprite_count(), 1);
        assert_eq!(list.circle_count(), 1);
        assert_eq!(list.missing_sprites().collect::<Vec<_>>(), vec!["ghost.png"]);
    }

    #[test]
    fn test_visibility_margin() {
        let list = DrawList::new(100.0, 100.0);
        assert!(list.is_visible(DVec2::new(-20.0, 50.0), 5.0));
        assert!(!list.is_visible(DVec2::new(-40.0, 50.0), 5.0));
        assert!(!list.is_visible(DVec2::new(50.0, 140.0), 5.0));
    }
}
