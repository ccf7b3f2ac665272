//! Type definitions for skywars-arena

use crate::error::{ArenaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countdown defaults, in scheduler runs (one run per second)
pub mod timers {
    /// Lobby countdown before the game starts
    pub const DEFAULT_START_TIME: u32 = 40;
    /// Round length (20 minutes)
    pub const DEFAULT_GAME_TIME: u32 = 20 * 60;
    /// Cooldown between the end of a round and the next lobby
    pub const DEFAULT_RESTART_TIME: u32 = 10;
}

/// The lobby countdown only runs while the roster is larger than this
pub const MIN_PLAYERS_TO_START: usize = 2;

pub const MAX_HEALTH: u32 = 20;
pub const MAX_FOOD: u32 = 20;

/// Default slot count written into a fresh configuration
pub const DEFAULT_SLOTS: usize = 12;

/// Arena lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for players, start countdown
    #[default]
    Lobby,
    /// Round in progress
    Game,
    /// Cooldown before the next lobby
    Restart,
}

/// How a broadcast is delivered to each participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Message,
    Tip,
    Popup,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Survival,
    Adventure,
}

/// A point in a world. Stored on disk as `"x,y,z"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Integer block coordinates containing this point
    pub fn block(&self) -> (i64, i64, i64) {
        (
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        )
    }
}

impl FromStr for Position {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ArenaError::InvalidPosition(s.to_string()));
        }

        let mut coords = [0.0; 3];
        for (coord, part) in coords.iter_mut().zip(&parts) {
            *coord = part
                .parse()
                .map_err(|_| ArenaError::InvalidPosition(s.to_string()))?;
        }

        Ok(Self::new(coords[0], coords[1], coords[2]))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl TryFrom<String> for Position {
    type Error = ArenaError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_string()
    }
}

/// Resolved location of the join sign
#[derive(Debug, Clone, PartialEq)]
pub struct SignLocation {
    pub position: Position,
    pub level: String,
}

/// Arena configuration, as stored in the arena's data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Name of the world the arena is played in
    pub level: Option<String>,
    /// Maximum players (default: 12)
    pub slots: usize,
    /// One spawn per slot, indexed by slot
    #[serde(default)]
    pub spawns: Vec<Position>,
    /// Set once the configuration passed validation
    #[serde(default)]
    pub enabled: bool,
    /// `["x,y,z", "<level>"]` of the join sign
    #[serde(default, rename = "joinsign")]
    pub join_sign: Vec<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            level: None,
            slots: DEFAULT_SLOTS,
            spawns: Vec::new(),
            enabled: false,
            join_sign: Vec::new(),
        }
    }
}

impl ArenaConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
            ..Default::default()
        }
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn slots(mut self, n: usize) -> Self {
        self.slots = n;
        self
    }

    pub fn spawns(mut self, spawns: Vec<Position>) -> Self {
        self.spawns = spawns;
        self
    }

    pub fn join_sign(mut self, position: Position, level: impl Into<String>) -> Self {
        self.join_sign = vec![position.to_string(), level.into()];
        self
    }

    /// Parse an arena data file.
    ///
    /// Returns `Ok(None)` for an empty record (`null`, `{}` or blank input),
    /// which the arena treats as "not configured yet". Records of the wrong
    /// shape (non-integer slots, spawns that are not a list, ...) are
    /// reported as `ConfigurationInvalid`.
    pub fn from_json(data: &str) -> Result<Option<Self>> {
        if data.trim().is_empty() {
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_str(data)?;
        match &value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => return Ok(None),
            _ => {}
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ArenaError::ConfigurationInvalid(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve `joinsign` into a position and level name
    pub fn sign_location(&self) -> Result<SignLocation> {
        let [position, level] = self.join_sign.as_slice() else {
            return Err(ArenaError::SignUnresolvable(format!(
                "expected 2 components, got {}",
                self.join_sign.len()
            )));
        };

        let position = position
            .parse::<Position>()
            .map_err(|e: ArenaError| ArenaError::SignUnresolvable(e.to_string()))?;

        Ok(SignLocation {
            position,
            level: level.clone(),
        })
    }
}

/// Arena status snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaInfo {
    pub level: Option<String>,
    pub phase: Phase,
    pub setup: bool,
    pub player_count: usize,
    pub slots: usize,
}
