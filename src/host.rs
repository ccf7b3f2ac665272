//! Host capabilities the arena drives.
//!
//! The arena never talks to the game server directly. World loading, sign
//! tiles and player manipulation go through these traits, and engine events
//! are handed to the arena as plain records.

use crate::error::Result;
use crate::types::{GameMode, Position};
use std::sync::Arc;

/// Loaded world, as seen by the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldHandle {
    pub name: String,
    pub folder_name: String,
}

impl WorldHandle {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            folder_name: name.clone(),
            name,
        }
    }
}

/// World lifecycle and world-tile access.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait WorldHost: Send + Sync {
    /// Whether a world with this name exists on disk or can be generated
    fn is_generated(&self, name: &str) -> bool;

    fn is_loaded(&self, name: &str) -> bool;

    fn load(&self, name: &str) -> Result<()>;

    fn unload(&self, world: &WorldHandle, save: bool);

    fn world_by_name(&self, name: &str) -> Option<WorldHandle>;

    fn set_autosave(&self, world: &WorldHandle, autosave: bool);

    /// Write four lines onto the sign tile at `position`.
    ///
    /// Fails with `SignUnresolvable` when there is no sign tile there.
    fn set_sign_text(
        &self,
        world: &WorldHandle,
        position: Position,
        lines: [String; 4],
    ) -> Result<()>;
}

/// A connected player
pub trait Participant: Send + Sync {
    /// Engine entity id; changes across reconnects
    fn id(&self) -> u64;

    fn name(&self) -> String;

    fn position(&self) -> Position;

    /// Teleport within the current world when `world` is `None`
    fn teleport(&self, world: Option<&WorldHandle>, position: Position);

    fn clear_inventory(&self);
    fn clear_armor(&self);
    fn clear_cursor(&self);

    fn set_game_mode(&self, mode: GameMode);
    fn set_health(&self, health: u32);
    fn set_food(&self, food: u32);

    fn send_message(&self, message: &str);
    fn send_tip(&self, message: &str);
    fn send_popup(&self, message: &str);
    fn send_title(&self, title: &str, subtitle: &str);
}

pub type PlayerRef = Arc<dyn Participant>;

/// Player moved
pub struct PlayerMoveEvent {
    pub player: PlayerRef,
    pub cancelled: bool,
}

/// Player is about to lose food
pub struct PlayerExhaustEvent {
    pub player: PlayerRef,
    pub cancelled: bool,
}

/// Player clicked a block
pub struct PlayerInteractEvent {
    pub player: PlayerRef,
    /// World the clicked block is in
    pub level: String,
    pub block: Position,
    pub cancelled: bool,
}

impl PlayerMoveEvent {
    pub fn new(player: PlayerRef) -> Self {
        Self {
            player,
            cancelled: false,
        }
    }
}

impl PlayerExhaustEvent {
    pub fn new(player: PlayerRef) -> Self {
        Self {
            player,
            cancelled: false,
        }
    }
}

impl PlayerInteractEvent {
    pub fn new(player: PlayerRef, level: impl Into<String>, block: Position) -> Self {
        Self {
            player,
            level: level.into(),
            block,
            cancelled: false,
        }
    }
}
