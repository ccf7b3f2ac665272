//! Arena - lobby/game/restart state machine for a single map

use crate::error::{ArenaError, Result};
use crate::host::{
    PlayerExhaustEvent, PlayerInteractEvent, PlayerMoveEvent, PlayerRef, WorldHandle, WorldHost,
};
use crate::roster::Roster;
use crate::types::*;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Arena - owns one map's configuration, roster and phase
pub struct Arena<H> {
    host: Arc<H>,
    config: ArenaConfig,
    phase: Phase,
    setup: bool,
    roster: Roster,
    world: Option<WorldHandle>,
}

impl<H: WorldHost> Arena<H> {
    /// Create an arena from its data file contents.
    ///
    /// An arena that fails validation, or whose world can not be loaded,
    /// stays in setup mode; an empty record is replaced by the default data
    /// so it can be filled in. A valid arena is loaded straight away.
    pub fn new(host: Arc<H>, config: Option<ArenaConfig>) -> Self {
        let empty = config.is_none();
        let mut arena = Self {
            host,
            config: config.unwrap_or_default(),
            phase: Phase::Lobby,
            setup: true,
            roster: Roster::default(),
            world: None,
        };

        if empty {
            warn!("Arena configuration is empty, entering setup mode");
            return arena;
        }

        arena.enable(true);
        arena
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Edit the configuration. Call [`Arena::enable`] afterwards to
    /// re-validate it.
    pub fn config_mut(&mut self) -> &mut ArenaConfig {
        &mut self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_setup(&self) -> bool {
        self.setup
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.config.slots
    }

    pub fn world(&self) -> Option<&WorldHandle> {
        self.world.as_ref()
    }

    pub fn info(&self) -> ArenaInfo {
        ArenaInfo {
            level: self.config.level.clone(),
            phase: self.phase,
            setup: self.setup,
            player_count: self.roster.len(),
            slots: self.config.slots,
        }
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Validate the configuration and leave setup mode if it passes.
    ///
    /// The world is only (re)loaded when `load_world` is set; a failed load
    /// puts the arena back into setup mode and returns false. Any `enabled`
    /// flag already in the data file is ignored until validation passes.
    pub fn enable(&mut self, load_world: bool) -> bool {
        if let Err(e) = self.check_config() {
            warn!("Arena stays in setup mode: {}", e);
            self.enter_setup();
            return false;
        }

        self.config.enabled = true;
        self.setup = false;
        info!("Arena {:?} enabled", self.config.level);

        if load_world {
            if let Err(e) = self.load_arena(false) {
                error!("Can not load arena: {}", e);
                return false;
            }
        }

        true
    }

    fn enter_setup(&mut self) {
        self.config.enabled = false;
        self.setup = true;
        self.world = None;
        self.phase = Phase::Lobby;
        self.roster = Roster::default();
    }

    fn check_config(&self) -> Result<()> {
        let invalid =
            |reason: String| -> Result<()> { Err(ArenaError::ConfigurationInvalid(reason)) };

        let Some(level) = &self.config.level else {
            return invalid("level is not set".to_string());
        };
        if !self.host.is_generated(level) {
            return invalid(format!("level {level} does not exist"));
        }
        if self.config.spawns.len() != self.config.slots {
            return invalid(format!(
                "{} spawns configured for {} slots",
                self.config.spawns.len(),
                self.config.slots
            ));
        }
        if self.config.join_sign.len() != 2 {
            return invalid(format!(
                "join sign needs 2 components, got {}",
                self.config.join_sign.len()
            ));
        }

        Ok(())
    }

    /// Load the arena world and reset to an empty lobby.
    ///
    /// With `restart` the current world is unloaded first, discarding
    /// everything that changed during the round. If the world can not be
    /// loaded the arena drops back into setup mode.
    pub fn load_arena(&mut self, restart: bool) -> Result<()> {
        if !self.config.enabled {
            error!("Can not load arena: Arena is not enabled!");
            return Err(ArenaError::ConfigurationInvalid(
                "arena is not enabled".to_string(),
            ));
        }

        let level = self
            .config
            .level
            .clone()
            .ok_or_else(|| ArenaError::ConfigurationInvalid("level is not set".to_string()))?;

        if restart {
            if let Some(world) = self.world.take() {
                self.host.unload(&world, false);
            }
        }

        let world = match self.bind_world(&level) {
            Ok(world) => world,
            Err(e) => {
                self.enter_setup();
                return Err(e);
            }
        };
        self.host.set_autosave(&world, false);

        self.world = Some(world);
        self.phase = Phase::Lobby;
        self.roster = Roster::default();

        info!("Arena {} loaded (restart: {})", level, restart);
        Ok(())
    }

    fn bind_world(&self, level: &str) -> Result<WorldHandle> {
        if !self.host.is_loaded(level) {
            self.host
                .load(level)
                .map_err(|e| ArenaError::WorldUnavailable(format!("{level}: {e}")))?;
        }

        self.host
            .world_by_name(level)
            .ok_or_else(|| ArenaError::WorldUnavailable(level.to_string()))
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// Put a player into the lowest free slot and reset them for the lobby
    pub fn join_to_arena(&mut self, player: PlayerRef) -> Result<()> {
        if self.setup || !self.config.enabled {
            player.send_message("> Arena is under setup!");
            return Err(ArenaError::SetupInProgress);
        }

        if self.is_full() {
            player.send_message("> Arena is full!");
            return Err(ArenaError::CapacityExceeded);
        }

        if self.roster.contains(&player) {
            player.send_message("> You are already in the arena!");
            return Ok(());
        }

        let (slot, spawn) = self
            .roster
            .first_free_slot(self.config.slots)
            .and_then(|slot| self.config.spawns.get(slot).map(|spawn| (slot, *spawn)))
            .ok_or(ArenaError::CapacityExceeded)?;

        self.roster.assign(slot, player.clone());
        player.teleport(self.world.as_ref(), spawn);

        player.clear_inventory();
        player.clear_armor();
        player.clear_cursor();

        player.set_game_mode(GameMode::Adventure);
        player.set_health(MAX_HEALTH);
        player.set_food(MAX_FOOD);

        debug!("{} took slot {}", player.name(), slot);
        self.broadcast_message(
            &format!(
                "> Player {} joined! [{}/{}]",
                player.name(),
                self.roster.len(),
                self.config.slots
            ),
            MessageKind::Message,
            "",
        );

        Ok(())
    }

    /// Remove a player (disconnect or elimination). Returns false if they
    /// were not in the arena.
    pub fn quit_arena(&mut self, player: &PlayerRef) -> bool {
        if self.roster.remove(player).is_none() {
            return false;
        }

        debug!("{} left the arena", player.name());
        self.broadcast_message(
            &format!(
                "> Player {} left the arena! [{}/{}]",
                player.name(),
                self.roster.len(),
                self.config.slots
            ),
            MessageKind::Message,
            "",
        );
        true
    }

    /// Lobby -> Game. From here on players are tracked by name.
    pub fn start_game(&mut self) {
        self.roster = std::mem::take(&mut self.roster).into_named();
        for player in self.roster.players() {
            player.set_game_mode(GameMode::Survival);
        }

        self.phase = Phase::Game;
        info!("Game started with {} players", self.roster.len());

        self.broadcast_message("Game Started!", MessageKind::Title, "");
    }

    /// Game -> Restart, announcing the last player standing if there is one
    pub fn end_game(&mut self) {
        if self.phase != Phase::Game {
            return;
        }

        self.phase = Phase::Restart;

        let players = self.roster.players();
        if let [winner] = players.as_slice() {
            info!("Game over, {} won", winner.name());
            self.broadcast_message(
                &format!("> Player {} won the game!", winner.name()),
                MessageKind::Message,
                "",
            );
            winner.send_title("You won!", "");
        } else {
            info!("Game over, time is up");
            self.broadcast_message("> Time is up!", MessageKind::Message, "");
        }
    }

    /// Whether the player is bound to this arena.
    ///
    /// Lobby membership is checked by entity id, in-game membership by name.
    pub fn in_game(&self, player: &PlayerRef) -> bool {
        self.roster.contains(player)
    }

    pub fn broadcast_message(&self, message: &str, kind: MessageKind, sub_message: &str) {
        for player in self.roster.players() {
            match kind {
                MessageKind::Message => player.send_message(message),
                MessageKind::Tip => player.send_tip(message),
                MessageKind::Popup => player.send_popup(message),
                MessageKind::Title => player.send_title(message, sub_message),
            }
        }
    }

    // =========================================================================
    // Engine events
    // =========================================================================

    /// Keep lobby players on their spawn
    pub fn on_move(&self, event: &mut PlayerMoveEvent) {
        if self.phase != Phase::Lobby || !self.in_game(&event.player) {
            return;
        }

        let Some(spawn) = self
            .roster
            .slot_of(event.player.id())
            .and_then(|slot| self.config.spawns.get(slot))
        else {
            return;
        };

        // Cancelling the move does not stop the client, teleport instead
        if event.player.position().distance(spawn) > 1.0 {
            event.player.teleport(None, *spawn);
        }
    }

    /// No hunger while waiting in the lobby
    pub fn on_exhaust(&self, event: &mut PlayerExhaustEvent) {
        if self.in_game(&event.player) && self.phase == Phase::Lobby {
            event.cancelled = true;
        }
    }

    /// Join when the player clicks the arena's sign
    pub fn on_interact(&mut self, event: &mut PlayerInteractEvent) {
        let player = event.player.clone();

        match self.phase {
            Phase::Game => {
                player.send_message("> Arena is in-game");
                return;
            }
            Phase::Restart => {
                player.send_message("> Arena is restarting!");
                return;
            }
            Phase::Lobby => {}
        }

        if self.setup {
            return;
        }

        let sign = match self.config.sign_location() {
            Ok(sign) => sign,
            Err(e) => {
                debug!("Ignoring interact: {}", e);
                return;
            }
        };

        if self.host.world_by_name(&sign.level).is_none() {
            return;
        }

        if event.level == sign.level && event.block.block() == sign.position.block() {
            if let Err(e) = self.join_to_arena(player.clone()) {
                debug!("{} could not join: {}", player.name(), e);
            }
        }
    }
}
