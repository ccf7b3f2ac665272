//! Simulated server for skywars-arena
//!
//! Loads an arena from JSON, joins a few fake players through the join sign
//! and lets the scheduler play one round at 50x speed.
//!
//! ```text
//! RUST_LOG=skywars_arena=debug cargo run --example simulate
//! ```

use skywars_arena::{
    Arena, ArenaConfig, ArenaError, GameMode, Participant, Phase, PlayerInteractEvent, Position,
    Result, WorldHandle, WorldHost, sign_text, spawn_scheduler,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const ARENA_DATA: &str = r#"{
    "level": "sw1",
    "slots": 4,
    "spawns": ["0,64,0", "10,64,0", "0,64,10", "10,64,10"],
    "enabled": false,
    "joinsign": ["5,70,5", "lobby"]
}"#;

#[derive(Default)]
struct Server {
    loaded: Mutex<HashSet<String>>,
}

impl WorldHost for Server {
    fn is_generated(&self, name: &str) -> bool {
        matches!(name, "sw1" | "lobby")
    }

    fn is_loaded(&self, name: &str) -> bool {
        self.loaded.lock().unwrap().contains(name)
    }

    fn load(&self, name: &str) -> Result<()> {
        if !self.is_generated(name) {
            return Err(ArenaError::WorldUnavailable(name.to_string()));
        }
        println!("[World] loading {name}");
        self.loaded.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    fn unload(&self, world: &WorldHandle, save: bool) {
        println!("[World] unloading {} (save: {save})", world.name);
        self.loaded.lock().unwrap().remove(&world.name);
    }

    fn world_by_name(&self, name: &str) -> Option<WorldHandle> {
        self.is_loaded(name).then(|| WorldHandle::new(name))
    }

    fn set_autosave(&self, _world: &WorldHandle, _autosave: bool) {}

    fn set_sign_text(
        &self,
        _world: &WorldHandle,
        _position: Position,
        _lines: [String; 4],
    ) -> Result<()> {
        Ok(())
    }
}

struct FakePlayer {
    id: u64,
    name: String,
    position: Mutex<Position>,
}

impl Participant for FakePlayer {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn position(&self) -> Position {
        *self.position.lock().unwrap()
    }

    fn teleport(&self, _world: Option<&WorldHandle>, position: Position) {
        *self.position.lock().unwrap() = position;
    }

    fn clear_inventory(&self) {}
    fn clear_armor(&self) {}
    fn clear_cursor(&self) {}
    fn set_game_mode(&self, _mode: GameMode) {}
    fn set_health(&self, _health: u32) {}
    fn set_food(&self, _food: u32) {}

    fn send_message(&self, message: &str) {
        println!("[{}] {}", self.name, message);
    }

    fn send_tip(&self, _message: &str) {}

    fn send_popup(&self, _message: &str) {}

    fn send_title(&self, title: &str, _subtitle: &str) {
        println!("[{}] *** {} ***", self.name, title);
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server = Arc::new(Server::default());
    server.loaded.lock().unwrap().insert("lobby".to_string());

    let mut arena = Arena::new(server, ArenaConfig::from_json(ARENA_DATA)?);
    println!("Sign: {:?}\n", sign_text(&arena));

    let sign = arena.config().sign_location()?;
    for (id, name) in [(1, "Alice"), (2, "Bob"), (3, "Carol")] {
        let player = Arc::new(FakePlayer {
            id,
            name: name.to_string(),
            position: Mutex::new(Position::default()),
        });
        arena.on_interact(&mut PlayerInteractEvent::new(player, &sign.level, sign.position));
    }

    let arena = Arc::new(tokio::sync::Mutex::new(arena));
    let scheduler = spawn_scheduler(arena.clone(), Duration::from_millis(20));

    let mut seen = Phase::Lobby;
    loop {
        tokio::time::sleep(Duration::from_millis(100)).await;

        let mut arena = arena.lock().await;
        if arena.phase() == seen {
            continue;
        }
        seen = arena.phase();
        println!("\nSign: {:?}\n", sign_text(&*arena));

        match seen {
            Phase::Game => {
                // Eliminate everyone but the first player
                for player in arena.roster().players().into_iter().skip(1) {
                    arena.quit_arena(&player);
                }
            }
            Phase::Lobby => break,
            Phase::Restart => {}
        }
    }

    scheduler.abort();
    println!("Round finished, arena is back in the lobby.");
    Ok(())
}
