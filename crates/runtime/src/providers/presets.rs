//! Ready-made decision functions.
//!
//! These are deliberately simple: enough to autoplay an encounter, fill the
//! enemy side in tests, or replay a fixed script.

use std::collections::VecDeque;

use combat_core::{ActionKind, CombatSession, CombatantId};

use crate::api::{ActionChoice, ActionProvider, Result, RuntimeError};

/// Attacks the first legal enemy, every turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicAttackProvider;

impl ActionProvider for BasicAttackProvider {
    fn provide_action(
        &mut self,
        actor: CombatantId,
        session: &CombatSession,
    ) -> Result<ActionChoice> {
        first_target(actor, session, &ActionKind::Attack)
            .map(ActionChoice::attack)
            .ok_or_else(|| RuntimeError::Provider {
                actor,
                reason: "no legal attack target".into(),
            })
    }
}

/// Uses the first ready skill the actor can afford, otherwise attacks.
///
/// Consumables are left alone; the side's stock is usually better spent by
/// a human or a smarter policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAvailableProvider;

impl ActionProvider for FirstAvailableProvider {
    fn provide_action(
        &mut self,
        actor: CombatantId,
        session: &CombatSession,
    ) -> Result<ActionChoice> {
        let available = session.available_actions(actor);

        let preferred = available
            .iter()
            .filter(|kind| matches!(kind, ActionKind::Skill(_)))
            .chain(available.iter().filter(|kind| matches!(kind, ActionKind::Attack)));

        for kind in preferred {
            if let Some(target) = first_target(actor, session, kind) {
                return Ok(ActionChoice::new(kind.clone(), Some(target)));
            }
        }

        if available.contains(&ActionKind::Flee) {
            return Ok(ActionChoice::flee());
        }

        Err(RuntimeError::Provider {
            actor,
            reason: "no available action".into(),
        })
    }
}

/// Replays a fixed list of choices in order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<ActionChoice>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = ActionChoice>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl ActionProvider for ScriptedProvider {
    fn provide_action(
        &mut self,
        actor: CombatantId,
        _session: &CombatSession,
    ) -> Result<ActionChoice> {
        self.script.pop_front().ok_or_else(|| RuntimeError::Provider {
            actor,
            reason: "script exhausted".into(),
        })
    }
}

fn first_target(
    actor: CombatantId,
    session: &CombatSession,
    kind: &ActionKind,
) -> Option<CombatantId> {
    session
        .legal_targets(actor, kind)
        .ok()
        .and_then(|targets| targets.first().copied())
}
