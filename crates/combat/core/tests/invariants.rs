//! Property tests over randomly generated encounters.

use combat_core::{
    ActionKind, CombatSession, CombatStats, Combatant, CombatantId, EffectTemplate, ResourceMeter,
    Side, Skill, StatusEffectKind,
};
use proptest::prelude::*;

fn arb_combatant(id: u32, side: Side) -> impl Strategy<Value = Combatant> {
    (
        1u32..120,
        0u32..60,
        0u32..25,
        0u32..15,
        prop::option::of(1u32..40),
        0u32..4,
    )
        .prop_map(move |(health, energy, attack, defense, damage, cooldown)| {
            let mut skill = Skill::new("strike", "Strike")
                .with_energy_cost(energy / 3)
                .with_cooldown(cooldown)
                .with_range(2)
                .with_effect(EffectTemplate::new(StatusEffectKind::Burning, 3, 2));
            skill.damage = damage;

            Combatant::new(CombatantId(id), format!("#{id}"), side, health, energy)
                .with_stats(CombatStats::new(attack, defense))
                .with_skill(skill)
                .with_skill(
                    Skill::new("mend", "Mend")
                        .with_energy_cost(energy / 4)
                        .with_healing(15)
                        .with_cooldown(1),
                )
        })
}

fn arb_roster() -> impl Strategy<Value = Vec<Combatant>> {
    (1usize..4, 1usize..4).prop_flat_map(|(allies, enemies)| {
        let ally_ids = 1..=allies as u32;
        let enemy_ids = (allies as u32 + 1)..=(allies + enemies) as u32;

        let allies: Vec<_> = ally_ids.map(|id| arb_combatant(id, Side::Ally)).collect();
        let enemies: Vec<_> = enemy_ids.map(|id| arb_combatant(id, Side::Enemy)).collect();

        (allies, enemies).prop_map(|(mut allies, enemies)| {
            allies.extend(enemies);
            allies
        })
    })
}

proptest! {
    #[test]
    fn meters_stay_clamped(current in any::<u32>(), maximum in any::<u32>(), hits in prop::collection::vec((any::<bool>(), any::<u32>()), 0..20)) {
        let mut meter = ResourceMeter::new(current, maximum);
        prop_assert!(meter.is_consistent());

        for (heal, amount) in hits {
            if heal {
                meter.restore(amount);
            } else {
                meter.deplete(amount);
            }
            prop_assert!(meter.current() <= meter.maximum());
        }
    }

    #[test]
    fn random_battles_respect_invariants(roster in arb_roster(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..60)) {
        let mut session = CombatSession::initialize(roster).unwrap();

        for pick in picks {
            let Some(actor) = session.current_actor() else { break };
            let actor_side = session.state().combatant(actor).unwrap().side;

            let choices: Vec<(ActionKind, Option<CombatantId>)> = session
                .available_actions(actor)
                .into_iter()
                .filter(|kind| *kind != ActionKind::Flee)
                .flat_map(|kind| {
                    let targets = session.legal_targets(actor, &kind).unwrap();
                    targets.into_iter().map(move |t| (kind.clone(), Some(t)))
                })
                .collect();
            prop_assert!(!choices.is_empty());

            let (kind, target) = pick.get(&choices).clone();

            // Target legality never crosses sides for the wrong class.
            let target_side = session.state().combatant(target.unwrap()).unwrap().side;
            match &kind {
                ActionKind::Attack => prop_assert_ne!(target_side, actor_side),
                ActionKind::Skill(id) if id.as_str() == "mend" => prop_assert_eq!(target_side, actor_side),
                ActionKind::Skill(id) if id.as_str() == "strike" => prop_assert_ne!(target_side, actor_side),
                _ => {}
            }

            session.execute(actor, kind, target).unwrap();

            prop_assert!(session.state().resources_consistent());
            if let Some(next) = session.current_actor() {
                prop_assert!(session.state().combatant(next).unwrap().is_alive());
            }
            prop_assert!(session.state().participants.iter().all(|c| c.status_effects.iter().all(|e| e.remaining > 0)));
        }
    }
}
