//! Gameplay simulation module
//!
//! All gameplay logic lives here, single-threaded and synchronous:
//! - Driven by an external tick callback supplying the elapsed delta
//! - Seeded RNG only (spawn economy draws)
//! - No rendering or platform dependencies; the host drains `GameEvent`s
//!   and supplies contact-start events from its physics broad-phase

pub mod archetype;
pub mod collision;
pub mod director;
pub mod emitter;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use archetype::{stat_multiplier, EnemyArchetype, PlayerArchetype};
pub use collision::{resolve_contacts, ContactEvent, ContactTag};
pub use director::{Director, SpawnIntent};
pub use emitter::Emitter;
pub use enemy::Enemy;
pub use player::{GamepadInput, KeyInput, Player, PointerInput};
pub use projectile::Projectile;
pub use state::{Actor, ArenaState, Capability, DeathCause, GameEvent, MatchReport, Side};
pub use tick::{tick, TickInput};
