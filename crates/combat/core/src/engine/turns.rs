//! Turn scheduling and round-wrap resolution.

use crate::env::CombatEnv;
use crate::event::{CombatEvent, HealthChange};
use crate::state::{Combatant, CombatantId, Side};

use super::CombatEngine;

/// Result of [`CombatEngine::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The turn moved to `actor`. `round_wrapped` is set when the order
    /// passed index zero on the way.
    Advanced {
        actor: CombatantId,
        round_wrapped: bool,
    },

    /// No living combatant to hand the turn to, or one side is wiped out.
    Stalled,
}

impl CombatEngine<'_> {
    /// Hands the turn to the next living combatant in turn order.
    ///
    /// Passing index zero starts a new round: cooldowns tick down, ongoing
    /// effects resolve, then durations decay. Does nothing while either side
    /// has no living members.
    pub fn advance(&mut self, env: &CombatEnv<'_>) -> AdvanceOutcome {
        if !self.state.side_alive(Side::Ally) || !self.state.side_alive(Side::Enemy) {
            return AdvanceOutcome::Stalled;
        }

        let len = self.state.turn.order.len();
        let mut index = self.state.turn.index;
        let mut round_wrapped = false;

        for _ in 0..len {
            index = (index + 1) % len;
            if index == 0 {
                self.wrap_round(env);
                round_wrapped = true;
            }

            let next = self.state.turn.order.get(index).and_then(|&slot| {
                self.state
                    .participants
                    .get(slot)
                    .filter(|c| c.is_alive())
                    .map(|c| (c.id, c.side))
            });

            if let Some((actor, side)) = next {
                self.state.turn.index = index;
                self.state.turn.acting_side = side;
                self.state.record(CombatEvent::TurnStarted { actor, side });
                return AdvanceOutcome::Advanced {
                    actor,
                    round_wrapped,
                };
            }
        }

        AdvanceOutcome::Stalled
    }

    /// Once-per-round bookkeeping.
    fn wrap_round(&mut self, env: &CombatEnv<'_>) {
        let state = &mut *self.state;
        state.turn.round = state.turn.round.next();
        let round = state.turn.round;
        state.record(CombatEvent::RoundStarted { round });

        let tick = env.config().effects.tick_on_round_wrap;
        let mut events = Vec::new();

        for combatant in state.participants.iter_mut() {
            for skill in combatant.skills.iter_mut() {
                skill.tick_cooldown();
            }

            if tick && combatant.is_alive() {
                resolve_ongoing_effects(combatant, &mut events);
            }

            for kind in combatant.status_effects.decay() {
                events.push(CombatEvent::EffectExpired {
                    target: combatant.id,
                    kind,
                });
            }
        }

        for event in events {
            state.record(event);
        }
    }
}

/// Applies damage- and healing-over-time effects in list order.
fn resolve_ongoing_effects(combatant: &mut Combatant, events: &mut Vec<CombatEvent>) {
    let ticking: Vec<_> = combatant
        .status_effects
        .iter()
        .filter(|e| e.kind.is_damage_over_time() || e.kind.is_healing_over_time())
        .map(|e| (e.kind, e.magnitude))
        .collect();

    for (kind, magnitude) in ticking {
        if !combatant.is_alive() {
            break;
        }

        let change = if kind.is_damage_over_time() {
            HealthChange::Damage(combatant.health.deplete(magnitude))
        } else {
            HealthChange::Healing(combatant.health.restore(magnitude))
        };
        events.push(CombatEvent::EffectTicked {
            target: combatant.id,
            kind,
            change,
        });

        if !combatant.is_alive() {
            events.push(CombatEvent::CombatantDefeated {
                combatant: combatant.id,
            });
        }
    }
}
