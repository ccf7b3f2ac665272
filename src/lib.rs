//! # skywars-arena
//!
//! SkyWars minigame arena: a single map cycling through lobby, game and
//! restart phases.
//!
//! ## Features
//!
//! - **Setup Mode**: Arenas with incomplete data stay closed until validated
//! - **Slots**: Players join into the lowest free slot and its spawn
//! - **Countdowns**: Lobby start countdown, round timer and restart cooldown
//! - **Join Sign**: A world sign shows live status and joins players on click
//!
//! The game server is abstracted behind [`WorldHost`] and [`Participant`];
//! engine events are passed in as [`PlayerMoveEvent`], [`PlayerExhaustEvent`]
//! and [`PlayerInteractEvent`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use skywars_arena::{Arena, ArenaConfig, ArenaScheduler, Position};
//! use std::sync::Arc;
//!
//! let data = std::fs::read_to_string("arenas/sw1.json")?;
//! let mut arena = Arena::new(Arc::new(server), ArenaConfig::from_json(&data)?);
//! let mut scheduler = ArenaScheduler::new();
//!
//! // Every second:
//! scheduler.on_run(&mut arena, tick);
//!
//! // From the engine's interact listener:
//! arena.on_interact(&mut event);
//! ```

pub mod arena;
pub mod error;
pub mod host;
pub mod roster;
pub mod scheduler;
pub mod time;
pub mod types;


pub use arena::Arena;
pub use error::{ArenaError, Result};
pub use host::{
    Participant, PlayerExhaustEvent, PlayerInteractEvent, PlayerMoveEvent, PlayerRef,
    WorldHandle, WorldHost,
};
pub use roster::Roster;
pub use scheduler::{ArenaScheduler, sign_text, spawn_scheduler};
pub use types::*;
