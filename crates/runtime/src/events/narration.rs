//! Human-readable text for logged combat events.
//!
//! Narration is derived from the structured log and meant for display only:
//! "Vex the Ranger attacks Raider for 9 damage (12 left)".

use std::collections::BTreeMap;

use combat_core::{
    CombatEvent, CombatState, CombatantId, HealthChange, ItemId, ItemOracle, LoggedEvent, SkillId,
};

/// Resolves ids to display names and formats events.
#[derive(Clone, Debug, Default)]
pub struct Narrator {
    combatants: BTreeMap<CombatantId, String>,
    skills: BTreeMap<SkillId, String>,
    items: BTreeMap<ItemId, String>,
}

impl Narrator {
    /// Collects names from the encounter's participants and the item catalog.
    pub fn new(state: &CombatState, items: &dyn ItemOracle) -> Self {
        let mut narrator = Self::default();

        for combatant in &state.participants {
            narrator
                .combatants
                .insert(combatant.id, combatant.name.clone());
            for skill in &combatant.skills {
                narrator
                    .skills
                    .entry(skill.id.clone())
                    .or_insert_with(|| skill.name.clone());
            }
        }

        for definition in items.definitions() {
            narrator
                .items
                .insert(definition.id.clone(), definition.name.clone());
        }

        narrator
    }

    pub fn narrate(&self, entry: &LoggedEvent) -> String {
        match &entry.event {
            CombatEvent::RoundStarted { round } => format!("--- Round {round} ---"),
            CombatEvent::TurnStarted { actor, side } => {
                format!("{}'s turn ({side})", self.combatant(*actor))
            }
            CombatEvent::AttackResolved {
                actor,
                target,
                amount,
                remaining,
            } => format!(
                "{} attacks {} for {amount} damage ({remaining} left)",
                self.combatant(*actor),
                self.combatant(*target)
            ),
            CombatEvent::SkillUsed {
                actor,
                skill,
                target,
                damage,
                healing,
                ..
            } => {
                let mut text = format!(
                    "{} uses {} on {}",
                    self.combatant(*actor),
                    self.skill(skill),
                    self.combatant(*target)
                );
                if let Some(damage) = damage {
                    text.push_str(&format!(", dealing {damage} damage"));
                }
                if let Some(healing) = healing {
                    text.push_str(&format!(", restoring {healing} health"));
                }
                text
            }
            CombatEvent::ItemUsed {
                actor,
                item,
                target,
                healing,
                ..
            } => match healing {
                Some(healing) => format!(
                    "{} uses {} on {}, restoring {healing} health",
                    self.combatant(*actor),
                    self.item(item),
                    self.combatant(*target)
                ),
                None => format!(
                    "{} uses {} on {}",
                    self.combatant(*actor),
                    self.item(item),
                    self.combatant(*target)
                ),
            },
            CombatEvent::EffectApplied {
                target,
                kind,
                magnitude,
                remaining,
                ..
            } => format!(
                "{} is {} ({magnitude}) for {remaining} rounds",
                self.combatant(*target),
                kind.as_str()
            ),
            CombatEvent::EffectsCleansed { target, removed } => {
                if removed.is_empty() {
                    format!("{} has nothing to cleanse", self.combatant(*target))
                } else {
                    let names: Vec<_> = removed.iter().map(|kind| kind.as_str()).collect();
                    format!(
                        "{} is cleansed of {}",
                        self.combatant(*target),
                        names.join(", ")
                    )
                }
            }
            CombatEvent::EffectTicked {
                target,
                kind,
                change,
            } => match change {
                HealthChange::Damage(amount) => format!(
                    "{} takes {amount} damage from being {}",
                    self.combatant(*target),
                    kind.as_str()
                ),
                HealthChange::Healing(amount) => format!(
                    "{} recovers {amount} health from being {}",
                    self.combatant(*target),
                    kind.as_str()
                ),
            },
            CombatEvent::EffectExpired { target, kind } => format!(
                "{} is no longer {}",
                self.combatant(*target),
                kind.as_str()
            ),
            CombatEvent::CombatantDefeated { combatant } => {
                format!("{} is defeated!", self.combatant(*combatant))
            }
            CombatEvent::Fled { actor, side } => {
                format!("{} calls the retreat; the {side} side flees", self.combatant(*actor))
            }
            CombatEvent::CombatEnded { outcome } => format!("Combat over: {outcome}"),
        }
    }

    fn combatant(&self, id: CombatantId) -> String {
        self.combatants
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Combatant{id}"))
    }

    fn skill<'a>(&'a self, id: &'a SkillId) -> &'a str {
        self.skills.get(id).map_or(id.as_str(), String::as_str)
    }

    fn item<'a>(&'a self, id: &'a ItemId) -> &'a str {
        self.items.get(id).map_or(id.as_str(), String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{
        Combatant, Consumables, ItemCatalog, Round, Side, StatusEffectKind, TurnState,
    };

    fn narrator() -> Narrator {
        let state = CombatState::new(
            vec![
                Combatant::new(CombatantId(1), "Vex", Side::Ally, 30, 10),
                Combatant::new(CombatantId(2), "Raider", Side::Enemy, 20, 5),
            ],
            TurnState::new(vec![0, 1], 0, Side::Ally),
            Consumables::default(),
        );
        Narrator::new(&state, &ItemCatalog::new())
    }

    fn entry(event: CombatEvent) -> LoggedEvent {
        LoggedEvent {
            sequence: 0,
            round: Round::FIRST,
            event,
        }
    }

    #[test]
    fn attack_uses_display_names() {
        let text = narrator().narrate(&entry(CombatEvent::AttackResolved {
            actor: CombatantId(1),
            target: CombatantId(2),
            amount: 7,
            remaining: 13,
        }));
        assert_eq!(text, "Vex attacks Raider for 7 damage (13 left)");
    }

    #[test]
    fn unknown_ids_fall_back() {
        let text = narrator().narrate(&entry(CombatEvent::EffectExpired {
            target: CombatantId(9),
            kind: StatusEffectKind::Poisoned,
        }));
        assert_eq!(text, "Combatant#9 is no longer poisoned");
    }
}
