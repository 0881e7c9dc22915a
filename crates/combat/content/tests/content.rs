use std::fs;

use combat_content::ContentFactory;
use combat_core::{
    ActionKind, CombatEnv, CombatSession, ConsumablePool, Consumables, ItemOracle, Side,
    legal_targets,
};

#[test]
fn embedded_content_loads() {
    let factory = ContentFactory::embedded();

    let config = factory.load_config().unwrap();
    let items = factory.load_items().unwrap();
    let roster = factory.load_roster().unwrap();

    assert_eq!(config.minimum_damage(), 1);
    assert!(!items.is_empty());
    assert!(roster.participants.iter().any(|c| c.side == Side::Ally));
    assert!(roster.participants.iter().any(|c| c.side == Side::Enemy));

    for (item, _) in roster
        .consumables
        .side(Side::Ally)
        .iter()
        .chain(roster.consumables.side(Side::Enemy).iter())
    {
        assert!(
            items.definition(item).is_some(),
            "supply '{item}' missing from catalog"
        );
    }
}

#[test]
fn embedded_roster_starts_a_session() {
    let factory = ContentFactory::embedded();
    let roster = factory.load_roster().unwrap();

    let session = CombatSession::builder(roster.participants)
        .consumables(roster.consumables)
        .items(std::sync::Arc::new(factory.load_items().unwrap()))
        .config(factory.load_config().unwrap())
        .build()
        .unwrap();

    assert!(session.current_actor().is_some());
}

/// Healing-class content never reaches the opposing side; damaging content
/// never reaches the acting side. Checked for every skill in the roster and
/// every item in the catalog, from every combatant's perspective.
#[test]
fn catalog_targeting_never_crosses_sides() {
    let factory = ContentFactory::embedded();
    let config = factory.load_config().unwrap();
    let items = factory.load_items().unwrap();
    let roster = factory.load_roster().unwrap();

    // Give both sides every catalog item so item targeting can be queried.
    let everything: ConsumablePool = items.definitions().map(|d| (d.id.clone(), 1)).collect();
    let session = CombatSession::builder(roster.participants)
        .consumables(Consumables::new(everything.clone(), everything))
        .build()
        .unwrap();
    let state = session.state();
    let env = CombatEnv::new(&config, &items);

    for actor in &state.participants {
        let kinds = std::iter::once(ActionKind::Attack)
            .chain(actor.skills.iter().map(|s| ActionKind::Skill(s.id.clone())))
            .chain(items.definitions().map(|d| ActionKind::UseItem(d.id.clone())));

        for kind in kinds {
            let class = combat_core::action::classify(actor, &kind, &env).unwrap();
            let targets = legal_targets(state, &env, actor.id, &kind).unwrap();

            for target in targets {
                let side = state.combatant(target).unwrap().side;
                match class {
                    combat_core::TargetClass::Healing => assert_eq!(
                        side, actor.side,
                        "{kind:?} from {} reached the opposing side",
                        actor.name
                    ),
                    combat_core::TargetClass::Damaging => assert_ne!(
                        side, actor.side,
                        "{kind:?} from {} reached its own side",
                        actor.name
                    ),
                    combat_core::TargetClass::Untargeted => {
                        panic!("{kind:?} should not have targets")
                    }
                }
            }
        }
    }
}

#[test]
fn directory_content_overrides_embedded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("combat.toml"), "minimum_damage = 4\n").unwrap();
    fs::write(
        dir.path().join("items.ron"),
        r#"(items: [(id: "stimpak", name: "Stimpak", effect: InstantHeal(amount: 10))])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("roster.ron"),
        r#"(allies: [(name: "Solo", health: 50)], enemies: [(name: "Rat", health: 5)])"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_config().unwrap().minimum_damage(), 4);
    assert_eq!(factory.load_items().unwrap().len(), 1);
    assert_eq!(factory.load_roster().unwrap().participants.len(), 2);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path()).load_items().unwrap_err();

    assert!(err.to_string().contains("items.ron"));
}
