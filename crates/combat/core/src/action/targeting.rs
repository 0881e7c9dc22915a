//! Target legality.
//!
//! Actions fall into two targeting classes. Healing-class actions may only
//! target living members of the acting side (the actor included); damaging
//! actions may only target living members of the opposing side. Which skills
//! and items count as healing-class is driven by [`TargetingConfig`] tag sets
//! rather than hard-coded ids.

use crate::config::TargetingConfig;
use crate::env::{CombatEnv, ItemDefinition};
use crate::state::{CombatState, Combatant, CombatantId, Side, Skill};

use super::{ActionError, ActionKind, actor_of};

/// Targeting class of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetClass {
    Healing,
    Damaging,
    Untargeted,
}

impl TargetClass {
    /// Side whose living members are legal targets for an actor on `acting`.
    pub fn target_side(self, acting: Side) -> Option<Side> {
        match self {
            TargetClass::Healing => Some(acting),
            TargetClass::Damaging => Some(acting.opposing()),
            TargetClass::Untargeted => None,
        }
    }
}

pub fn skill_class(skill: &Skill, config: &TargetingConfig) -> TargetClass {
    let tagged = config.is_healing_tag(skill.id.as_str())
        || skill.tags.iter().any(|tag| config.is_healing_tag(tag));

    if skill.healing.is_some() || tagged {
        TargetClass::Healing
    } else {
        TargetClass::Damaging
    }
}

pub fn item_class(item: &ItemDefinition, config: &TargetingConfig) -> TargetClass {
    let tagged = config.is_restorative_tag(item.id.as_str())
        || item.tags.iter().any(|tag| config.is_restorative_tag(tag));

    if tagged || item.effect.is_restorative() {
        TargetClass::Healing
    } else {
        TargetClass::Damaging
    }
}

/// Classifies `kind` as performed by `actor`.
///
/// Fails if the skill is not known to the actor or the item is missing from
/// the catalog.
pub fn classify(
    actor: &Combatant,
    kind: &ActionKind,
    env: &CombatEnv<'_>,
) -> Result<TargetClass, ActionError> {
    let targeting = &env.config().targeting;
    match kind {
        ActionKind::Attack => Ok(TargetClass::Damaging),
        ActionKind::Skill(id) => actor
            .skill(id)
            .map(|skill| skill_class(skill, targeting))
            .ok_or_else(|| ActionError::UnknownSkill(id.clone())),
        ActionKind::UseItem(id) => env
            .items()
            .definition(id)
            .map(|item| item_class(item, targeting))
            .ok_or_else(|| ActionError::UnknownItem(id.clone())),
        ActionKind::Flee => Ok(TargetClass::Untargeted),
    }
}

/// Returns every combatant `actor` may legally target with `kind`, in
/// participant order. Untargeted actions yield an empty list.
pub fn legal_targets(
    state: &CombatState,
    env: &CombatEnv<'_>,
    actor: CombatantId,
    kind: &ActionKind,
) -> Result<Vec<CombatantId>, ActionError> {
    let acting = actor_of(state, actor)?;
    let class = classify(acting, kind, env)?;

    let Some(side) = class.target_side(acting.side) else {
        return Ok(Vec::new());
    };

    Ok(state.living(side).map(|c| c.id).collect())
}

/// Checks that `target` is a legal target for `kind` and returns it.
pub(crate) fn validate_target(
    state: &CombatState,
    env: &CombatEnv<'_>,
    actor: CombatantId,
    kind: &ActionKind,
    target: Option<CombatantId>,
) -> Result<CombatantId, ActionError> {
    let acting = actor_of(state, actor)?;
    let class = classify(acting, kind, env)?;
    let target = target.ok_or(ActionError::MissingTarget)?;
    let targeted = state
        .combatant(target)
        .ok_or(ActionError::TargetNotFound(target))?;

    match class.target_side(acting.side) {
        Some(side) if targeted.side == side && targeted.is_alive() => Ok(target),
        _ => Err(ActionError::IllegalTarget(target)),
    }
}
