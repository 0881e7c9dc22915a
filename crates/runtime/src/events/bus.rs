//! Topic-based event bus implementation.

use std::collections::BTreeMap;

use combat_core::{CombatEvent, LoggedEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Topic {
    /// Round and turn hand-over
    Turn,
    /// Attacks, skills, items and flee
    Action,
    /// Status effects and defeats
    Effect,
    /// Encounter termination
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Turn, Topic::Action, Topic::Effect, Topic::Outcome];

    pub fn of(event: &CombatEvent) -> Topic {
        match event {
            CombatEvent::RoundStarted { .. } | CombatEvent::TurnStarted { .. } => Topic::Turn,
            CombatEvent::AttackResolved { .. }
            | CombatEvent::SkillUsed { .. }
            | CombatEvent::ItemUsed { .. }
            | CombatEvent::Fled { .. } => Topic::Action,
            CombatEvent::EffectApplied { .. }
            | CombatEvent::EffectsCleansed { .. }
            | CombatEvent::EffectTicked { .. }
            | CombatEvent::EffectExpired { .. }
            | CombatEvent::CombatantDefeated { .. } => Topic::Effect,
            CombatEvent::CombatEnded { .. } => Topic::Outcome,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Receivers are drained with `try_recv`; a lagging
/// receiver loses the oldest events first.
#[derive(Clone)]
pub struct EventBus {
    channels: BTreeMap<Topic, broadcast::Sender<LoggedEvent>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self { channels }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: &LoggedEvent) {
        let topic = Topic::of(&event.event);

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event.clone()).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn publish_all<'a>(&self, events: impl IntoIterator<Item = &'a LoggedEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<LoggedEvent>> {
        self.channels.get(&topic).map(broadcast::Sender::subscribe)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatantId, Round, Side};

    fn logged(sequence: u64, event: CombatEvent) -> LoggedEvent {
        LoggedEvent {
            sequence,
            round: Round::FIRST,
            event,
        }
    }

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut turns = bus.subscribe(Topic::Turn).unwrap();
        let mut actions = bus.subscribe(Topic::Action).unwrap();

        bus.publish(&logged(
            0,
            CombatEvent::TurnStarted {
                actor: CombatantId(1),
                side: Side::Ally,
            },
        ));

        assert_eq!(turns.try_recv().unwrap().sequence, 0);
        assert!(actions.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(1);
        bus.publish(&logged(
            0,
            CombatEvent::CombatantDefeated {
                combatant: CombatantId(2),
            },
        ));
    }
}
