//! Resolution engine integration tests
//!
//! These drive full exchanges end-to-end with a scripted check gateway, so
//! every assertion is about engine behavior rather than dice luck.

use rand::rngs::StdRng;
use rand::SeedableRng;
use skirmish::actor::Posture;
use skirmish::checks::CheckType;
use skirmish::effects::{EffectDelta, EffectStore};
use skirmish::gear::AttackProfile;
use skirmish::moves::RangedMode;
use skirmish::position::{Facing, FacingTracker};
use skirmish::resolution::resolve_attack;
use skirmish::wounds::{ThresholdWounds, WoundSeverity};
use skirmish::{
    AttackMove, CheckDifficulty, Combatant, DefenseMove, FinisherKind, NoFallback, OffenseKind,
    Outcome, ResolutionContext, RuleConfiguration, ScriptedGateway,
};

/// Bundle of everything a resolution borrows, so tests stay terse
struct Harness {
    config: RuleConfiguration,
    checks: ScriptedGateway,
    facing: FacingTracker,
    wounds: ThresholdWounds,
    effects: EffectStore,
    chooser: NoFallback,
    rng: StdRng,
}

impl Harness {
    fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            config: RuleConfiguration::default(),
            checks: ScriptedGateway::new(outcomes),
            facing: FacingTracker::new(),
            wounds: ThresholdWounds,
            effects: EffectStore::new(),
            chooser: NoFallback,
            rng: StdRng::seed_from_u64(99),
        }
    }

    fn ctx(&mut self) -> ResolutionContext<'_> {
        ResolutionContext {
            config: &self.config,
            checks: &mut self.checks,
            facing: &mut self.facing,
            wounds: &mut self.wounds,
            effects: &self.effects,
            chooser: &mut self.chooser,
            rng: &mut self.rng,
        }
    }
}

fn sword_attack(attacker: &Combatant, defender: &Combatant) -> AttackMove {
    AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::MeleeWeapon {
            attack: AttackProfile::sword_slash(),
        },
    )
}

#[test]
fn test_helpless_defense_passing_attack_always_lands() {
    for outcome in [Outcome::MinorPass, Outcome::Pass, Outcome::MajorPass] {
        let mut attacker = Combatant::test_swordsman();
        let mut defender = Combatant::test_brawler();
        let defender_id = defender.id;
        let attack = sword_attack(&attacker, &defender);

        let mut harness = Harness::new([outcome]);
        let resolved =
            resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx())
                .unwrap();

        assert!(resolved.result.move_was_successful);
        assert_eq!(resolved.result.attacker_outcome, Some(outcome));
        assert_eq!(resolved.result.defender_outcome, None);
        assert!(!resolved.result.wounds_caused.is_empty());
    }
}

#[test]
fn test_helpless_defense_failing_attack_never_wounds() {
    for outcome in [Outcome::MinorFail, Outcome::Fail, Outcome::MajorFail] {
        let mut attacker = Combatant::test_swordsman();
        let mut defender = Combatant::test_brawler();
        let defender_id = defender.id;
        let attack = sword_attack(&attacker, &defender);

        let mut harness = Harness::new([outcome]);
        let resolved =
            resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx())
                .unwrap();

        assert!(!resolved.result.move_was_successful);
        assert!(resolved.result.wounds_caused.is_empty());
        assert!(resolved.result.self_wounds_caused.is_empty());
    }
}

#[test]
fn test_recovery_difficulty_follows_attacker_check() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;

    let attack = sword_attack(&attacker, &defender);
    let mut harness = Harness::new([Outcome::Pass]);
    let pass =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();
    assert_eq!(
        pass.result.recovery_difficulty,
        AttackProfile::sword_slash().recovery_success
    );

    let attack = sword_attack(&attacker, &defender);
    let mut harness = Harness::new([Outcome::Fail]);
    let fail =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();
    assert_eq!(
        fail.result.recovery_difficulty,
        AttackProfile::sword_slash().recovery_failure
    );
}

#[test]
fn test_decisive_defense_stages_recovery_up() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = sword_attack(&attacker, &defender);

    // Attacker fails, defender dodges with a major pass (3 degrees).
    let mut harness = Harness::new([Outcome::Fail, Outcome::MajorPass]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::dodge(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    let base_failure = AttackProfile::sword_slash().recovery_failure;
    assert_eq!(
        resolved.result.recovery_difficulty,
        base_failure.stage_up(2)
    );
}

#[test]
fn test_advantages_are_consumed_by_resolution() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    attacker.grant_offensive_advantage(20.0);
    defender.grant_defensive_advantage(15.0);

    let attack = sword_attack(&attacker, &defender);
    let mut harness = Harness::new([Outcome::Pass, Outcome::Pass, Outcome::MinorPass]);
    resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::dodge(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert_eq!(attacker.offensive_advantage(), 0.0);
    assert_eq!(defender.defensive_advantage(), 0.0);

    // The bonuses actually reached the checks.
    assert_eq!(harness.checks.log[0].0, CheckType::MeleeWeaponCheck);
    assert_eq!(harness.checks.log[0].2, 20.0);
    assert_eq!(harness.checks.log[1].0, CheckType::DodgeCheck);
    assert_eq!(harness.checks.log[1].2, 15.0);
}

#[test]
fn test_advantage_consumed_on_every_defense_branch() {
    let kinds: [fn(skirmish::core::ActorId) -> DefenseMove; 3] = [
        DefenseMove::dodge,
        DefenseMove::parry,
        DefenseMove::block,
    ];
    for make_defense in kinds {
        let mut attacker = Combatant::test_swordsman();
        let mut defender = Combatant::test_shield_fighter();
        let defender_id = defender.id;
        defender.grant_defensive_advantage(9.0);

        let attack = sword_attack(&attacker, &defender);
        let mut harness = Harness::new([Outcome::Pass, Outcome::Pass, Outcome::MinorPass]);
        resolve_attack(
            &mut attacker,
            &mut defender,
            &attack,
            Some(make_defense(defender_id)),
            &mut harness.ctx(),
        )
        .unwrap();

        assert_eq!(defender.defensive_advantage(), 0.0);
    }
}

#[test]
fn test_perfect_dodge_rewards_defender() {
    let mut attacker = Combatant::test_brawler();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;

    // An easy-to-land but near-impossible-to-dodge strike: the defender who
    // majors anyway earns a Total win from the difficulty spread.
    let mut profile = AttackProfile::punch();
    profile.difficulty = CheckDifficulty::VeryEasy;
    profile.defense_difficulty = CheckDifficulty::Insane;
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::NaturalAttack {
            natural: skirmish::gear::NaturalAttack {
                name: "punch".to_string(),
                striking_part: "right hand".to_string(),
                profile,
            },
        },
    );

    let mut harness = Harness::new([Outcome::MajorPass, Outcome::MajorPass]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::dodge(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(!resolved.result.move_was_successful);
    assert!(resolved.result.wounds_caused.is_empty());
    assert_eq!(
        defender.offensive_advantage(),
        harness.config.perfect_dodge_offensive_advantage
    );
    // The defender slipped around the attacker: the attacker's facing
    // record against them is no longer neutral.
    assert_ne!(harness.facing.facing(attacker.id, defender.id), Facing::Front);
}

#[test]
fn test_major_fail_dodge_can_drop_defender_prone() {
    let mut fell = 0;
    for seed in 0..40 {
        let mut attacker = Combatant::test_swordsman();
        let mut defender = Combatant::test_brawler();
        let defender_id = defender.id;
        let attack = sword_attack(&attacker, &defender);

        let mut harness = Harness::new([
            Outcome::MajorPass,
            Outcome::MajorFail,
            Outcome::MinorPass,
        ]);
        harness.rng = StdRng::seed_from_u64(seed);
        resolve_attack(
            &mut attacker,
            &mut defender,
            &attack,
            Some(DefenseMove::dodge(defender_id)),
            &mut harness.ctx(),
        )
        .unwrap();

        if defender.posture == Posture::Prone {
            fell += 1;
        }
    }
    // Configured chance is 25%; over forty trials both outcomes must occur.
    assert!(fell > 0);
    assert!(fell < 40);
}

#[test]
fn test_facing_worsens_across_repeated_attacks() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;

    // Two whiffed attacks in the same encounter walk the attacker's facing
    // record from Front through a flank to Rear.
    let mut harness = Harness::new([
        Outcome::Fail,
        Outcome::Pass,
        Outcome::Fail,
        Outcome::Pass,
    ]);
    for _ in 0..2 {
        let attack = sword_attack(&attacker, &defender);
        resolve_attack(
            &mut attacker,
            &mut defender,
            &attack,
            Some(DefenseMove::dodge(defender_id)),
            &mut harness.ctx(),
        )
        .unwrap();
    }
    assert_eq!(harness.facing.facing(attacker.id, defender.id), Facing::Rear);
}

#[test]
fn test_landed_attack_resets_attacker_facing() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = sword_attack(&attacker, &defender);

    let mut harness = Harness::new([Outcome::MajorPass, Outcome::MajorFail, Outcome::MinorPass]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::dodge(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(resolved.result.move_was_successful);
    assert_eq!(harness.facing.facing(attacker.id, defender.id), Facing::Front);
}

#[test]
fn test_second_wind_restores_stamina_once() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    defender.second_wind = skirmish::stamina::SecondWindState::fresh();
    defender.stamina = 0.0;

    let attack = sword_attack(&attacker, &defender);
    let mut harness = Harness::new([Outcome::Pass, Outcome::MinorPass]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::too_exhausted(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert_eq!(defender.stamina, defender.max_stamina);
    assert!(resolved
        .deltas
        .iter()
        .any(|delta| matches!(delta, EffectDelta::SecondWindImmunity { .. })));

    // Spent: the next exhaustion gets no rescue.
    defender.stamina = 0.0;
    let attack = sword_attack(&attacker, &defender);
    let mut harness = Harness::new([Outcome::Pass, Outcome::MinorPass]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::too_exhausted(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();
    assert_eq!(defender.stamina, 0.0);
    assert!(!resolved
        .deltas
        .iter()
        .any(|delta| matches!(delta, EffectDelta::SecondWindImmunity { .. })));
}

#[test]
fn test_staggering_blow_layers_on_landed_hit() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack =
        sword_attack(&attacker, &defender).with_finisher(FinisherKind::StaggeringBlow);

    let mut harness = Harness::new([Outcome::Pass, Outcome::MinorPass, Outcome::Pass]);
    let resolved =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();

    assert!(resolved.result.move_was_successful);
    assert!(resolved
        .deltas
        .iter()
        .any(|delta| matches!(delta, EffectDelta::Staggered { .. })));
    assert!(resolved
        .deltas
        .iter()
        .any(|delta| matches!(delta, EffectDelta::ScheduleDelay { .. })));
}

#[test]
fn test_takedown_puts_defender_prone() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = sword_attack(&attacker, &defender).with_finisher(FinisherKind::Takedown);

    let mut harness = Harness::new([Outcome::Pass, Outcome::MinorPass, Outcome::Pass]);
    resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();

    assert_eq!(defender.posture, Posture::Prone);
}

#[test]
fn test_finisher_skipped_when_base_misses() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack =
        sword_attack(&attacker, &defender).with_finisher(FinisherKind::StaggeringBlow);

    let mut harness = Harness::new([Outcome::Fail]);
    let resolved =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();

    assert!(!resolved.result.move_was_successful);
    assert!(resolved.deltas.is_empty());
    // Only the attack check was rolled.
    assert_eq!(harness.checks.log.len(), 1);
}

#[test]
fn test_unbalancing_blow_saddles_defender_with_penalty() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack =
        sword_attack(&attacker, &defender).with_finisher(FinisherKind::UnbalancingBlow);

    let mut harness = Harness::new([Outcome::Pass, Outcome::MinorPass, Outcome::Pass]);
    resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();

    assert_eq!(
        defender.defensive_advantage(),
        -harness.config.unbalance_defensive_penalty
    );
}

#[test]
fn test_coup_de_grace_strikes_a_vital_part() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::CoupDeGrace {
            attack: AttackProfile::sword_thrust(),
        },
    );

    let mut harness = Harness::new([Outcome::MajorPass, Outcome::MinorPass]);
    let resolved =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();

    assert!(resolved.result.move_was_successful);
    let wound = &resolved.result.wounds_caused[0];
    assert!(wound.severity >= WoundSeverity::Critical);
    let part = defender.body.get(wound.bodypart.unwrap()).unwrap();
    assert!(part.vital);
}

#[test]
fn test_ranged_fire_consumes_ammunition() {
    let mut attacker = Combatant::test_archer();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let shot = AttackProfile::bow_shot();
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::Ranged {
            attack: shot.clone(),
            mode: RangedMode::Fire,
        },
    );

    let mut harness = Harness::new([Outcome::Pass, Outcome::MinorPass]);
    let first =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();
    assert!(first.result.move_was_successful);
    assert!(!attacker.ranged.as_ref().unwrap().loaded);

    // Empty weapon: a zero-effect result, not an error.
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::Ranged {
            attack: shot,
            mode: RangedMode::Fire,
        },
    );
    let mut harness = Harness::new([Outcome::Pass]);
    let second =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();
    assert!(!second.result.move_was_successful);
    assert!(second.result.attacker_outcome.is_none());
}

#[test]
fn test_grapple_initiate_and_wrench() {
    let mut attacker = Combatant::test_brawler();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;

    let attack = AttackMove::new(attacker.id, defender.id, OffenseKind::GrappleInitiate);
    let mut harness = Harness::new([Outcome::MajorPass, Outcome::MajorFail]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::counter_grapple(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(resolved.result.move_was_successful);
    let limbs = resolved.deltas.iter().find_map(|delta| match delta {
        EffectDelta::GrappleStarted { limbs, .. } => Some(*limbs),
        _ => None,
    });
    assert_eq!(limbs, Some(3));

    // Apply the hold, then wrench inside it.
    let mut harness = Harness::new([Outcome::Pass, Outcome::Fail, Outcome::MinorPass]);
    harness.effects.apply(&resolved.deltas);
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::GrappleWrench {
            attack: AttackProfile::wrench(),
        },
    );
    let wrench = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::counter_grapple(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(wrench.result.move_was_successful);
    assert!(!wrench.result.wounds_caused.is_empty());
    assert_eq!(
        wrench.result.wounds_caused[0].damage_type,
        skirmish::damage::DamageType::Wrenching
    );
}

#[test]
fn test_clinch_strike_entangles_the_pair() {
    let mut attacker = Combatant::test_brawler();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::ClinchNatural {
            natural: skirmish::gear::NaturalAttack::punch(),
        },
    );

    let mut harness = Harness::new([Outcome::Pass, Outcome::Fail, Outcome::MinorPass]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::dodge(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(resolved.result.move_was_successful);
    assert!(resolved
        .deltas
        .iter()
        .any(|delta| matches!(delta, EffectDelta::ClinchEntered { .. })));
}

#[test]
fn test_magic_power_attack_resolves_like_a_strike() {
    let mut attacker = Combatant::test_brawler();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::MagicPower {
            power_name: "force bolt".to_string(),
            attack: AttackProfile::force_bolt(),
        },
    );

    let mut harness = Harness::new([Outcome::MajorPass, Outcome::Fail, Outcome::MinorPass]);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::dodge(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(resolved.result.move_was_successful);
    let wound = &resolved.result.wounds_caused[0];
    assert_eq!(wound.damage_type, skirmish::damage::DamageType::Sonic);
    // Powers rebound on no one.
    assert!(resolved.result.self_wounds_caused.is_empty());
}

#[test]
fn test_strangle_uses_the_active_damage_path() {
    let mut attacker = Combatant::test_brawler();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;

    // Establish the hold first.
    let initiate = AttackMove::new(attacker.id, defender.id, OffenseKind::GrappleInitiate);
    let mut harness = Harness::new([Outcome::MajorPass]);
    let held = resolve_attack(&mut attacker, &mut defender, &initiate, None, &mut harness.ctx())
        .unwrap();

    let mut harness = Harness::new([Outcome::MajorPass, Outcome::Fail]);
    harness.effects.apply(&held.deltas);
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::GrappleStrangle {
            attack: AttackProfile::strangle(),
        },
    );
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::counter_grapple(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(resolved.result.move_was_successful);
    let wound = &resolved.result.wounds_caused[0];
    assert_eq!(wound.damage_type, skirmish::damage::DamageType::Hypoxia);
    let neck = defender.body.find("neck").unwrap();
    assert_eq!(wound.bodypart, Some(neck));
}

#[test]
fn test_breakout_releases_the_hold() {
    let mut attacker = Combatant::test_brawler();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;

    // The defender holds the attacker; the attacker struggles free.
    let mut harness = Harness::new([Outcome::MajorPass, Outcome::Fail]);
    harness.effects.apply(&[EffectDelta::GrappleStarted {
        grappler: defender.id,
        target: attacker.id,
        limbs: 2,
    }]);
    let attack = AttackMove::new(attacker.id, defender.id, OffenseKind::GrappleBreakout);
    let resolved = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::counter_grapple(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(resolved.result.move_was_successful);
    assert!(resolved
        .deltas
        .iter()
        .any(|delta| matches!(delta, EffectDelta::GrappleReleased { .. })));
}

#[test]
fn test_grapple_wrench_without_hold_is_irrelevant() {
    let mut attacker = Combatant::test_brawler();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = AttackMove::new(
        attacker.id,
        defender.id,
        OffenseKind::GrappleWrench {
            attack: AttackProfile::wrench(),
        },
    );

    let mut harness = Harness::new([Outcome::MajorPass]);
    let resolved =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();
    assert!(!resolved.result.move_was_successful);
    assert!(resolved.result.attacker_outcome.is_none());
}

#[test]
fn test_wound_capable_body_is_a_precondition() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    defender.body = skirmish::actor::Bodyplan::empty();
    let attack = sword_attack(&attacker, &defender);

    let mut harness = Harness::new([Outcome::Pass]);
    let result = resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx());
    assert!(result.is_err());
}

#[test]
fn test_unanticipated_defense_is_loud() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = sword_attack(&attacker, &defender);

    // Counter-grapple against a sword slash was never a sensible pairing.
    let mut harness = Harness::new([Outcome::Pass]);
    let result = resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::counter_grapple(defender_id)),
        &mut harness.ctx(),
    );
    assert!(result.is_err());
}

#[test]
fn test_stale_target_yields_zero_effect_result() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let someone_else = Combatant::test_brawler();
    let attack = sword_attack(&attacker, &someone_else);

    let mut harness = Harness::new([Outcome::Pass]);
    let resolved =
        resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();
    assert!(!resolved.result.move_was_successful);
    assert_eq!(
        resolved.result.recovery_difficulty,
        CheckDifficulty::Automatic
    );
    assert!(harness.checks.log.is_empty());
}

#[test]
fn test_exertion_ratchets_for_both_participants() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = sword_attack(&attacker, &defender);

    let mut harness = Harness::new([Outcome::Pass, Outcome::Pass]);
    resolve_attack(
        &mut attacker,
        &mut defender,
        &attack,
        Some(DefenseMove::dodge(defender_id)),
        &mut harness.ctx(),
    )
    .unwrap();

    assert!(attacker.exertion >= AttackProfile::sword_slash().exertion);
    assert!(defender.exertion >= AttackProfile::sword_slash().exertion);
}

#[test]
fn test_attack_spends_stamina() {
    let mut attacker = Combatant::test_swordsman();
    let mut defender = Combatant::test_brawler();
    let defender_id = defender.id;
    let attack = sword_attack(&attacker, &defender);
    let before = attacker.stamina;

    let mut harness = Harness::new([Outcome::Pass, Outcome::MinorPass]);
    resolve_attack(&mut attacker, &mut defender, &attack, None, &mut harness.ctx()).unwrap();
    assert!(attacker.stamina < before);
}
