use std::sync::Arc;

use combat_core::{
    ActionError, ActionKind, ActionResult, CombatEvent, CombatSession, CombatStats, Combatant,
    CombatantId, ConsumablePool, Consumables, EffectTemplate, ErrorClass, HealthChange,
    ItemCatalog, ItemDefinition, ItemEffect, ItemId, Outcome, Round, Side, Skill, SkillId,
    StatusEffectKind,
};

const RANGER: CombatantId = CombatantId(1);
const MEDIC: CombatantId = CombatantId(2);
const RAIDER: CombatantId = CombatantId(3);
const HOUND: CombatantId = CombatantId(4);

fn ranger() -> Combatant {
    Combatant::new(RANGER, "Ranger", Side::Ally, 100, 50)
        .with_stats(CombatStats::new(18, 3))
        .with_skill(
            Skill::new("field_dressing", "Field Dressing")
                .with_energy_cost(20)
                .with_healing(30)
                .with_cooldown(3),
        )
        .with_skill(
            Skill::new("overwatch", "Overwatch")
                .with_energy_cost(5)
                .with_damage(12)
                .with_cooldown(2),
        )
}

fn medic(health: u32) -> Combatant {
    Combatant::new(MEDIC, "Medic", Side::Ally, 100, 40)
        .with_stats(CombatStats::new(6, 2))
        .with_health(health)
}

fn raider(health: u32) -> Combatant {
    Combatant::new(RAIDER, "Raider", Side::Enemy, 80, 10)
        .with_stats(CombatStats::new(9, 5))
        .with_health(health)
}

fn hound(health: u32) -> Combatant {
    Combatant::new(HOUND, "Hound", Side::Enemy, 30, 0)
        .with_stats(CombatStats::new(7, 0))
        .with_health(health)
}

/// Attack damage: 18 attack against 5 defense.
const RANGER_ON_RAIDER: u32 = 13;

#[test]
fn scenario_a_basic_attack_passes_turn_to_enemy() {
    let mut session = CombatSession::initialize(vec![ranger(), raider(80)]).unwrap();

    let resolution = session
        .execute(RANGER, ActionKind::Attack, Some(RAIDER))
        .unwrap();

    assert_eq!(
        resolution.result,
        ActionResult::Attack {
            target: RAIDER,
            damage: RANGER_ON_RAIDER,
            defeated: false,
        }
    );
    let raider = session.state().combatant(RAIDER).unwrap();
    assert_eq!(raider.health.current(), 80 - RANGER_ON_RAIDER);
    assert_eq!(session.current_actor(), Some(RAIDER));
    assert_eq!(session.state().turn.acting_side, Side::Enemy);
}

#[test]
fn scenario_b_healing_skill_on_wounded_ally() {
    let mut session = CombatSession::initialize(vec![ranger(), medic(50), raider(80)]).unwrap();

    session
        .execute(
            RANGER,
            ActionKind::Skill(SkillId::new("field_dressing")),
            Some(MEDIC),
        )
        .unwrap();

    let state = session.state();
    let medic = state.combatant(MEDIC).unwrap();
    let ranger = state.combatant(RANGER).unwrap();
    assert_eq!(medic.health.current(), 80);
    assert_eq!(medic.health.maximum(), 100);
    assert_eq!(ranger.energy.current(), 30);
    assert_eq!(
        ranger
            .skill(&SkillId::new("field_dressing"))
            .unwrap()
            .current_cooldown,
        3
    );
}

#[test]
fn scenario_c_victory_is_immediate_without_advance() {
    let mut session = CombatSession::initialize(vec![ranger(), raider(10), hound(0)]).unwrap();
    let index_before = session.state().turn.index;

    let resolution = session
        .execute(RANGER, ActionKind::Attack, Some(RAIDER))
        .unwrap();

    assert_eq!(resolution.outcome, Some(Outcome::Victory));
    assert_eq!(session.outcome(), Some(Outcome::Victory));
    assert_eq!(session.state().turn.index, index_before);
    assert_eq!(session.state().turn.round, Round::FIRST);
    assert!(
        !resolution
            .events
            .iter()
            .any(|e| matches!(e.event, CombatEvent::TurnStarted { .. }))
    );
    assert!(matches!(
        resolution.events.last().map(|e| &e.event),
        Some(CombatEvent::CombatEnded {
            outcome: Outcome::Victory
        })
    ));
    assert_eq!(resolution.next_actor, None);
}

#[test]
fn scenario_d_flee_ends_encounter_at_any_enemy_health() {
    let mut session = CombatSession::initialize(vec![ranger(), raider(1)]).unwrap();

    let resolution = session.flee(RANGER).unwrap();

    assert_eq!(resolution.result, ActionResult::Fled { side: Side::Ally });
    assert_eq!(
        session.outcome(),
        Some(Outcome::Fled { side: Side::Ally })
    );
    assert_eq!(session.state().combatant(RAIDER).unwrap().health.current(), 1);
}

#[test]
fn scenario_e_skill_on_cooldown_leaves_state_untouched() {
    let cooling = Combatant::new(RANGER, "Ranger", Side::Ally, 100, 50).with_skill(
        Skill::new("overwatch", "Overwatch")
            .with_damage(12)
            .with_cooldown(3)
            .with_current_cooldown(2),
    );
    let mut session = CombatSession::initialize(vec![cooling, raider(80)]).unwrap();
    let before = session.state().clone();

    let err = session
        .execute(
            RANGER,
            ActionKind::Skill(SkillId::new("overwatch")),
            Some(RAIDER),
        )
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::InvalidAction);
    assert_eq!(session.state(), &before);
    assert!(session.is_active());
}

#[test]
fn cooldown_decreases_by_one_per_round() {
    let mut session = CombatSession::initialize(vec![ranger(), raider(80)]).unwrap();
    let overwatch = SkillId::new("overwatch");
    let cooldown = |session: &CombatSession| {
        session
            .state()
            .combatant(RANGER)
            .unwrap()
            .skill(&overwatch)
            .unwrap()
            .current_cooldown
    };

    session
        .execute(RANGER, ActionKind::Skill(overwatch.clone()), Some(RAIDER))
        .unwrap();
    assert_eq!(cooldown(&session), 2);

    session
        .execute(RAIDER, ActionKind::Attack, Some(RANGER))
        .unwrap();
    assert_eq!(session.state().turn.round, Round(2));
    assert_eq!(cooldown(&session), 1);

    session
        .execute(RANGER, ActionKind::Attack, Some(RAIDER))
        .unwrap();
    session
        .execute(RAIDER, ActionKind::Attack, Some(RANGER))
        .unwrap();
    assert_eq!(cooldown(&session), 0);

    session
        .execute(RANGER, ActionKind::Attack, Some(RAIDER))
        .unwrap();
    session
        .execute(RAIDER, ActionKind::Attack, Some(RANGER))
        .unwrap();
    assert_eq!(cooldown(&session), 0);
}

#[test]
fn defeated_combatants_never_take_turns() {
    let mut session =
        CombatSession::initialize(vec![ranger(), medic(0), raider(80), hound(5)]).unwrap();

    session
        .execute(RANGER, ActionKind::Attack, Some(HOUND))
        .unwrap();
    assert_eq!(session.current_actor(), Some(RAIDER));

    session
        .execute(RAIDER, ActionKind::Attack, Some(RANGER))
        .unwrap();
    assert_eq!(session.current_actor(), Some(RANGER));
}

#[test]
fn out_of_turn_request_is_rejected() {
    let mut session = CombatSession::initialize(vec![ranger(), raider(80)]).unwrap();

    let err = session
        .execute(RAIDER, ActionKind::Attack, Some(RANGER))
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::InvalidActorState);
    assert_eq!(session.current_actor(), Some(RANGER));
}

#[test]
fn enemy_cannot_flee_on_ally_turn() {
    let mut session = CombatSession::initialize(vec![ranger(), raider(80)]).unwrap();

    assert!(session.flee(RAIDER).is_err());
    assert!(session.is_active());
}

#[test]
fn stimpak_heals_then_runs_out() {
    let stimpak = ItemId::new("stimpak");
    let catalog: ItemCatalog = [ItemDefinition::new(
        "stimpak",
        "Stimpak",
        ItemEffect::InstantHeal { amount: 30 },
    )
    .with_energy_cost(5)]
    .into_iter()
    .collect();
    let wounded = ranger().with_health(40).with_energy(12);
    let mut session = CombatSession::builder(vec![wounded, raider(80)])
        .consumables(Consumables::new(
            ConsumablePool::new().with("stimpak", 1),
            ConsumablePool::new(),
        ))
        .items(Arc::new(catalog))
        .build()
        .unwrap();

    let resolution = session
        .execute(RANGER, ActionKind::UseItem(stimpak.clone()), Some(RANGER))
        .unwrap();

    assert_eq!(
        resolution.result,
        ActionResult::UseItem {
            item: stimpak.clone(),
            target: RANGER,
            healing: Some(30),
        }
    );
    assert_eq!(resolution.next_actor, Some(RAIDER));
    let ranger = session.state().combatant(RANGER).unwrap();
    assert_eq!(ranger.health.current(), 70);
    assert_eq!(ranger.energy.current(), 7);
    assert_eq!(
        session.state().consumables.side(Side::Ally).count(&stimpak),
        0
    );

    session
        .execute(RAIDER, ActionKind::Attack, Some(RANGER))
        .unwrap();
    assert_eq!(session.current_actor(), Some(RANGER));
    let before = session.state().clone();

    let err = session
        .execute(RANGER, ActionKind::UseItem(stimpak.clone()), Some(RANGER))
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::InvalidAction);
    assert_eq!(err.action_error(), Some(&ActionError::ItemDepleted(stimpak)));
    assert_eq!(session.state(), &before);

    let unknown = ItemId::new("rad_away");
    let err = session
        .execute(RANGER, ActionKind::UseItem(unknown.clone()), Some(RANGER))
        .unwrap_err();
    assert_eq!(err.action_error(), Some(&ActionError::UnknownItem(unknown)));
    assert_eq!(session.state(), &before);
    assert!(session.is_active());
}

#[test]
fn poison_tick_at_round_wrap_ends_the_fight() {
    let dart = SkillId::new("toxin_dart");
    let poisoner = Combatant::new(RANGER, "Ranger", Side::Ally, 100, 50)
        .with_stats(CombatStats::new(18, 3))
        .with_skill(
            Skill::new(dart.clone(), "Toxin Dart")
                .with_energy_cost(5)
                .with_damage(2)
                .with_effect(EffectTemplate::new(StatusEffectKind::Poisoned, 25, 2))
                .with_cooldown(2),
        );
    let mut session = CombatSession::initialize(vec![poisoner, raider(20)]).unwrap();

    let resolution = session
        .execute(RANGER, ActionKind::Skill(dart), Some(RAIDER))
        .unwrap();
    assert_eq!(resolution.outcome, None);
    assert!(session.state().combatant(RAIDER).unwrap().is_alive());

    let resolution = session
        .execute(RAIDER, ActionKind::Attack, Some(RANGER))
        .unwrap();

    assert_eq!(resolution.outcome, Some(Outcome::Victory));
    assert_eq!(session.outcome(), Some(Outcome::Victory));
    assert!(!session.state().combatant(RAIDER).unwrap().is_alive());

    let tags: Vec<_> = resolution
        .events
        .iter()
        .map(|e| e.event.as_snake_case())
        .collect();
    assert_eq!(
        tags,
        vec![
            "attack_resolved",
            "round_started",
            "effect_ticked",
            "combatant_defeated",
            "turn_started",
            "combat_ended",
        ]
    );
    assert!(resolution.events.iter().any(|e| matches!(
        e.event,
        CombatEvent::EffectTicked {
            target: RAIDER,
            kind: StatusEffectKind::Poisoned,
            change: HealthChange::Damage(_),
        }
    )));
}
