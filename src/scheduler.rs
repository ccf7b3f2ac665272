//! ArenaScheduler - per-second countdowns and join sign rendering

use crate::arena::Arena;
use crate::host::WorldHost;
use crate::time::{Duration, calculate_time, interval};
use crate::types::timers::*;
use crate::types::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Drives one arena through its phases.
///
/// Call [`ArenaScheduler::on_run`] once per second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaScheduler {
    pub start_time: u32,
    pub game_time: u32,
    pub restart_time: u32,
}

impl Default for ArenaScheduler {
    fn default() -> Self {
        Self {
            start_time: DEFAULT_START_TIME,
            game_time: DEFAULT_GAME_TIME,
            restart_time: DEFAULT_RESTART_TIME,
        }
    }
}

impl ArenaScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_run<H: WorldHost>(&mut self, arena: &mut Arena<H>, current_tick: u64) {
        self.reload_sign(arena);

        if arena.is_setup() {
            return;
        }

        match arena.phase() {
            Phase::Lobby => self.run_lobby(arena),
            Phase::Game => self.run_game(arena),
            Phase::Restart => self.run_restart(arena, current_tick),
        }
    }

    fn run_lobby<H: WorldHost>(&mut self, arena: &mut Arena<H>) {
        if arena.player_count() <= MIN_PLAYERS_TO_START {
            arena.broadcast_message(
                "> You need more players to start a game!",
                MessageKind::Message,
                "",
            );
            self.start_time = DEFAULT_START_TIME;
            return;
        }

        arena.broadcast_message(
            &format!("> Starting in {}sec.", calculate_time(self.start_time)),
            MessageKind::Message,
            "",
        );

        self.start_time = self.start_time.saturating_sub(1);
        if self.start_time == 0 {
            arena.start_game();
        }
    }

    fn run_game<H: WorldHost>(&mut self, arena: &mut Arena<H>) {
        self.game_time = self.game_time.saturating_sub(1);
        arena.broadcast_message(
            &format!("Game ends in {}", calculate_time(self.game_time)),
            MessageKind::Popup,
            "",
        );

        if self.game_time == 0 || arena.player_count() <= 1 {
            arena.end_game();
        }
    }

    fn run_restart<H: WorldHost>(&mut self, arena: &mut Arena<H>, current_tick: u64) {
        arena.broadcast_message(
            &format!("> Restarting in {}sec.", calculate_time(self.restart_time)),
            MessageKind::Tip,
            "",
        );

        self.restart_time = self.restart_time.saturating_sub(1);
        if self.restart_time > 0 {
            return;
        }

        if let Err(e) = arena.load_arena(true) {
            warn!("Arena restart failed at tick {}: {}", current_tick, e);
        }
        self.reload_timer();
    }

    /// Write the current status onto the join sign.
    ///
    /// Does nothing if the sign location is malformed or its world is not
    /// loaded; a missing sign tile is logged and skipped.
    pub fn reload_sign<H: WorldHost>(&self, arena: &Arena<H>) {
        let sign = match arena.config().sign_location() {
            Ok(sign) => sign,
            Err(e) => {
                debug!("Skipping sign update: {}", e);
                return;
            }
        };

        let Some(world) = arena.host().world_by_name(&sign.level) else {
            debug!("Skipping sign update: level {} is not loaded", sign.level);
            return;
        };

        if let Err(e) = arena
            .host()
            .set_sign_text(&world, sign.position, sign_text(arena))
        {
            debug!("Skipping sign update: {}", e);
        }
    }

    pub fn reload_timer(&mut self) {
        *self = Self::default();
    }
}

/// Render the four join sign lines for the arena's current state
pub fn sign_text<H: WorldHost>(arena: &Arena<H>) -> [String; 4] {
    let mut lines = [
        "SkyWars".to_string(),
        "[ ? / ? ]".to_string(),
        "Setup".to_string(),
        "Wait few sec...".to_string(),
    ];

    if arena.is_setup() {
        return lines;
    }

    lines[1] = format!("[ {}/{} ]", arena.player_count(), arena.config().slots);

    let (status, detail) = match arena.phase() {
        Phase::Lobby if arena.is_full() => ("Full".to_string(), "Arena is full".to_string()),
        Phase::Lobby => ("Join".to_string(), "Click to join!".to_string()),
        Phase::Game => {
            let map = arena
                .world()
                .map(|w| w.folder_name.clone())
                .or_else(|| arena.config().level.clone())
                .unwrap_or_default();
            ("InGame".to_string(), format!("Map: {map}"))
        }
        Phase::Restart => ("Restarting...".to_string(), "Wait few sec.".to_string()),
    };
    lines[2] = status;
    lines[3] = detail;

    lines
}

/// Run the scheduler for `arena` on a tokio interval.
///
/// The arena sits behind a mutex so engine event handlers on other tasks
/// can share it; every run holds the lock for its whole duration.
pub fn spawn_scheduler<H>(arena: Arc<Mutex<Arena<H>>>, period: Duration) -> JoinHandle<()>
where
    H: WorldHost + 'static,
{
    tokio::spawn(async move {
        let mut scheduler = ArenaScheduler::new();
        let mut ticker = interval(period);
        let mut tick: u64 = 0;

        loop {
            ticker.tick().await;

            let mut arena = arena.lock().await;
            scheduler.on_run(&mut *arena, tick);
            tick += 1;
        }
    })
}
