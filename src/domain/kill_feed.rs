use crate::domain::current_epoch_seconds;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of events retained; older entries are evicted from the tail.
pub const MAX_EVENTS: usize = 20;

// Category weights for flavor-text generation. Melee 50%, ranged 35%, trap 15%.
const MELEE_WEIGHT: f64 = 0.50;
const RANGED_WEIGHT: f64 = 0.35;

const MELEE_WEAPONS: [&str; 7] = ["Sword", "Dagger", "Axe", "Mace", "Club", "Knife", "Spear"];
const RANGED_WEAPONS: [&str; 5] = ["Bow", "Sling", "Throwing Knife", "Trident", "Net"];
const TRAP_WEAPONS: [&str; 5] = ["Fire", "Poison", "Explosive", "Falling Rocks", "Electric Trap"];

// A rendered kill-feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub text: String,
    pub occurred_at: u64,
}

/// Newest-first bounded log of kill-feed events.
///
/// The most recent event is always at index 0. Length never exceeds
/// [`MAX_EVENTS`]; inserting past capacity drops the oldest entries.
#[derive(Debug, Default)]
pub struct KillFeed {
    events: VecDeque<Event>,
}

impl KillFeed {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Render a death message for the victim and prepend it to the feed.
    ///
    /// Without a killer the message is a plain `"<victim> died."`. With one,
    /// a weighted random category and a uniform weapon pick decide the
    /// flavor text. The randomness is presentation only.
    pub fn record<R: Rng>(&mut self, rng: &mut R, victim: &str, killer: Option<&str>) -> Event {
        let text = match killer {
            None => format!("{victim} died."),
            Some(killer) => render_kill(rng, victim, killer),
        };

        let event = Event {
            text,
            occurred_at: current_epoch_seconds(),
        };

        self.events.push_front(event.clone());
        self.events.truncate(MAX_EVENTS);
        event
    }

    // Current events, newest-first. Does not mutate the feed.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.iter().cloned().collect()
    }

    pub fn reset(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// Pick a weighted category, then a uniform weapon within it.
fn render_kill<R: Rng>(rng: &mut R, victim: &str, killer: &str) -> String {
    let roll: f64 = rng.random();
    if roll < MELEE_WEIGHT {
        let weapon = MELEE_WEAPONS[rng.random_range(0..MELEE_WEAPONS.len())];
        format!("{victim} was slain by {killer} using {weapon}")
    } else if roll < MELEE_WEIGHT + RANGED_WEIGHT {
        let weapon = RANGED_WEAPONS[rng.random_range(0..RANGED_WEAPONS.len())];
        format!("{victim} was killed by {killer}'s {weapon}")
    } else {
        let weapon = TRAP_WEAPONS[rng.random_range(0..TRAP_WEAPONS.len())];
        format!("{victim} was caught in {killer}'s {weapon}")
    }
}
