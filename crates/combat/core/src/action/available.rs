//! Menu query: which actions a combatant could take right now.

use crate::env::CombatEnv;
use crate::state::{CombatState, CombatantId};

use super::{ActionKind, legal_targets};

/// Returns every action `actor` could legally take in the current state.
///
/// An action is listed when its resource gates pass and it has at least one
/// legal target. Flee is always listed for a living actor. Defeated or
/// unknown actors get an empty list.
pub fn available_actions(
    state: &CombatState,
    env: &CombatEnv<'_>,
    actor: CombatantId,
) -> Vec<ActionKind> {
    let Some(combatant) = state.combatant(actor) else {
        return Vec::new();
    };
    if !combatant.is_alive() {
        return Vec::new();
    }

    let has_target = |kind: &ActionKind| {
        legal_targets(state, env, actor, kind).is_ok_and(|targets| !targets.is_empty())
    };

    let mut actions = Vec::new();

    if has_target(&ActionKind::Attack) {
        actions.push(ActionKind::Attack);
    }

    for skill in &combatant.skills {
        let kind = ActionKind::Skill(skill.id.clone());
        if skill.is_selectable(&combatant.energy) && has_target(&kind) {
            actions.push(kind);
        }
    }

    for (item, _) in state.consumables.side(combatant.side).iter() {
        let affordable = env
            .items()
            .definition(item)
            .is_some_and(|definition| combatant.energy.covers(definition.energy_cost));
        let kind = ActionKind::UseItem(item.clone());
        if affordable && has_target(&kind) {
            actions.push(kind);
        }
    }

    actions.push(ActionKind::Flee);
    actions
}
