//! Roster - arena membership, keyed by slot in the lobby and by name in game

use crate::host::PlayerRef;
use std::collections::BTreeMap;

/// Players bound to the arena.
///
/// In the lobby every player owns a slot (and with it a spawn). Once the
/// game starts the roster is rekeyed by player name, since names survive a
/// reconnect and entity ids do not. Membership checks follow the key: by
/// entity id for `Slots`, by name for `Named`.
#[derive(Clone)]
pub enum Roster {
    Slots(BTreeMap<usize, PlayerRef>),
    Named(BTreeMap<String, PlayerRef>),
}

impl Default for Roster {
    fn default() -> Self {
        Roster::Slots(BTreeMap::new())
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Roster::Slots(slots) => f
                .debug_map()
                .entries(slots.iter().map(|(slot, p)| (slot, p.name())))
                .finish(),
            Roster::Named(named) => f.debug_set().entries(named.keys()).finish(),
        }
    }
}

impl Roster {
    pub fn len(&self) -> usize {
        match self {
            Roster::Slots(slots) => slots.len(),
            Roster::Named(named) => named.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn players(&self) -> Vec<PlayerRef> {
        match self {
            Roster::Slots(slots) => slots.values().cloned().collect(),
            Roster::Named(named) => named.values().cloned().collect(),
        }
    }

    /// Lowest slot below `slot_count` nobody holds. Always `None` once named.
    pub fn first_free_slot(&self, slot_count: usize) -> Option<usize> {
        match self {
            Roster::Slots(slots) => (0..slot_count).find(|slot| !slots.contains_key(slot)),
            Roster::Named(_) => None,
        }
    }

    /// Put a player into a slot. Returns false if the roster is already named.
    pub fn assign(&mut self, slot: usize, player: PlayerRef) -> bool {
        match self {
            Roster::Slots(slots) => {
                slots.insert(slot, player);
                true
            }
            Roster::Named(_) => false,
        }
    }

    pub fn contains(&self, player: &PlayerRef) -> bool {
        match self {
            Roster::Slots(slots) => slots.values().any(|p| p.id() == player.id()),
            Roster::Named(named) => named.contains_key(&player.name()),
        }
    }

    /// Slot held by the player with this entity id
    pub fn slot_of(&self, id: u64) -> Option<usize> {
        match self {
            Roster::Slots(slots) => slots
                .iter()
                .find_map(|(slot, p)| (p.id() == id).then_some(*slot)),
            Roster::Named(_) => None,
        }
    }

    pub fn remove(&mut self, player: &PlayerRef) -> Option<PlayerRef> {
        match self {
            Roster::Slots(slots) => {
                let slot = slots
                    .iter()
                    .find_map(|(slot, p)| (p.id() == player.id()).then_some(*slot))?;
                slots.remove(&slot)
            }
            Roster::Named(named) => named.remove(&player.name()),
        }
    }

    /// Rekey by player name. Players sharing a name collapse into one entry.
    pub fn into_named(self) -> Roster {
        match self {
            Roster::Slots(slots) => Roster::Named(
                slots
                    .into_values()
                    .map(|p| (p.name(), p))
                    .collect(),
            ),
            named => named,
        }
    }
}
