//! Color palette for game elements and particles

use super::Rgba;

pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
pub const YELLOW: Rgba = [1.0, 0.92, 0.2, 1.0];
pub const ORANGE: Rgba = [1.0, 0.6, 0.1, 1.0];
pub const RED: Rgba = [0.95, 0.15, 0.1, 1.0];
pub const CYAN: Rgba = [0.2, 0.95, 1.0, 1.0];
pub const MAGENTA: Rgba = [1.0, 0.2, 0.9, 1.0];

pub const BROWN: Rgba = [0.55, 0.35, 0.2, 1.0];
pub const GRAY: Rgba = [0.5, 0.5, 0.5, 1.0];
pub const DARK_GRAY: Rgba = [0.3, 0.3, 0.3, 1.0];
pub const LIGHT_GRAY: Rgba = [0.8, 0.8, 0.8, 1.0];

pub const DARK_BLUE: Rgba = [0.05, 0.1, 0.5, 1.0];
pub const BLUE: Rgba = [0.2, 0.4, 1.0, 1.0];
pub const DARK_GREEN: Rgba = [0.05, 0.4, 0.1, 1.0];
pub const GREEN: Rgba = [0.2, 0.9, 0.3, 1.0];
pub const DARK_RED: Rgba = [0.5, 0.05, 0.05, 1.0];

/// Placeholders drawn when a sprite is missing
pub const PLACEHOLDER_HAZARD: Rgba = [0.55, 0.45, 0.35, 1.0];
pub const PLACEHOLDER_SHIP: Rgba = [0.7, 0.2, 0.2, 1.0];
pub const PLACEHOLDER_PLAYER: Rgba = [0.3, 0.6, 1.0, 1.0];
pub const PLACEHOLDER_BOSS: Rgba = [0.6, 0.2, 0.8, 1.0];
pub const PLACEHOLDER_PROJECTILE: Rgba = [1.0, 0.9, 0.4, 1.0];
pub const PLACEHOLDER_DRONE: Rgba = GRAY;

pub const SHIELD: Rgba = [0.3, 0.8, 1.0, 0.6];
pub const HEALTH_BAR: Rgba = RED;
pub const HEALTH_BAR_BACK: Rgba = [0.2, 0.2, 0.2, 0.8];

/// Lighten a color toward white (plasma cloud outer glow)
pub fn brighter(color: Rgba) -> Rgba {
    [
        (color[0] + (1.0 - color[0]) * 0.3),
        (color[1] + (1.0 - color[1]) * 0.3),
        (color[2] + (1.0 - color[2]) * 0.3),
        color[3],
    ]
}
