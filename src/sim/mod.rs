//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-tick kinematics, elapsed-seconds timers
//! - Seeded RNG only
//! - Rendering through the abstract [`Surface`](crate::renderer::Surface)

pub mod boss;
pub mod collision;
pub mod drone;
pub mod entity;
pub mod hazard;
pub mod hostile;
pub mod manager;
pub mod particles;
pub mod player;
pub mod stage;
pub mod state;

pub use boss::{AttackPattern, Boss, BossPhase};
pub use collision::{Marks, circles_overlap, collides};
pub use drone::Drone;
pub use entity::{Body, Bounds, Entity, Frame, Projectile, ProjectileStyle, SimRng};
pub use hazard::{Hazard, HazardTier};
pub use hostile::{Hostile, HullColor};
pub use manager::{EntityManager, TickContext};
pub use particles::{Effect, Explosion, ShipExplosion};
pub use player::{BulletMode, PlayerInput, PlayerShip};
pub use stage::{StageDirector, StageEvent};
pub use state::GameState;
