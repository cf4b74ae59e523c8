use fan_engine::game::scoring::multiplier_of;
use fan_engine::tile::{parse_tiles, Tile};
use fan_engine::{
    ActionFlags, Actor, Bonus, LastAction, ScoreCalculator, ScoringContext, ScoringEngine, ScoringRules,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[test]
fn test_dealer_kong_replacement_is_40() {
    // 1 番，底分 10，庄家 ×2，杠上开花 ×2
    let ctx = ScoringContext::new()
        .with_dealer(true)
        .with_self_draw(true)
        .with_last_action(LastAction::Kong(Actor::Own));
    assert_eq!(ScoreCalculator::new(10).compute(1, &ctx), 40);
}

#[test]
fn test_every_bonus() {
    let ctx = ScoringContext::new()
        .with_dealer(true)
        .with_self_draw(true)
        .with_last_action(LastAction::ReplacementDraw)
        .with_last_tile_in_wall(true)
        .with_consecutive_kongs(2);
    let flags = ActionFlags::from_context(&ctx);

    assert_eq!(
        flags.bonuses().as_slice(),
        &[Bonus::KongReplacement, Bonus::LastTile, Bonus::Dealer, Bonus::ConsecutiveKongs(2)]
    );
    assert_eq!(flags.multiplier(), 2 * 2 * 2 * 3);
    assert_eq!(ScoreCalculator::new(2).compute(5, &ctx), 2 * 5 * 24);
}

#[test]
fn test_robbed_kong_and_kong_replacement_are_disjoint() {
    // 抢杠和一定是点炮，杠上开花一定是自摸
    let robbed = ActionFlags::from_context(&ScoringContext::new().with_last_action(LastAction::Kong(Actor::Opponent)));
    assert!(robbed.is_robbed_kong);
    assert!(!robbed.is_kong_replacement);

    let own = ActionFlags::from_context(
        &ScoringContext::new()
            .with_self_draw(true)
            .with_last_action(LastAction::Kong(Actor::Own)),
    );
    assert!(own.is_kong_replacement);
    assert!(!own.is_robbed_kong);
}

#[test]
fn test_multiplier_commutes_under_shuffles() {
    let mut rng = StdRng::seed_from_u64(7);
    let pool = [
        Bonus::KongReplacement,
        Bonus::RobbedKong,
        Bonus::LastTile,
        Bonus::Dealer,
        Bonus::ConsecutiveKongs(1),
        Bonus::ConsecutiveKongs(3),
    ];

    for _ in 0..200 {
        let mut bonuses: Vec<Bonus> = pool.choose_multiple(&mut rng, 4).copied().collect();
        let expected = multiplier_of(&bonuses);
        for _ in 0..10 {
            bonuses.shuffle(&mut rng);
            assert_eq!(multiplier_of(&bonuses), expected, "{:?}", bonuses);
        }
    }
}

#[test]
fn test_overflow_saturates() {
    let ctx = ScoringContext::new()
        .with_dealer(true)
        .with_last_tile_in_wall(true)
        .with_consecutive_kongs(u8::MAX);
    assert_eq!(ScoreCalculator::new(u32::MAX).compute(88, &ctx), u32::MAX);
    assert_eq!(ScoreCalculator::new(1).compute(0, &ctx), 0);
}

#[test]
fn test_rules_from_json() {
    let rules = ScoringRules::from_json(r#"{ "base_score": 5 }"#).unwrap();
    assert_eq!(rules.base_score, 5);
    assert_eq!(rules.max_fan, ScoringRules::DEFAULT_MAX_FAN);

    let json = rules.to_json().unwrap();
    assert_eq!(ScoringRules::from_json(&json).unwrap(), rules);

    assert!(ScoringRules::from_json("{ not json").is_err());
}

#[test]
fn test_cap_applies_before_multiplier() {
    let tiles = parse_tiles("12345678m111p55p").unwrap();
    let ctx = ScoringContext::new().with_dealer(true);

    for max_fan in [1, 10, 88] {
        let engine = ScoringEngine::new(ScoringRules::default().with_base_score(3).with_max_fan(max_fan));
        let outcome = engine.score_win(&tiles, &[], Tile::Wan(9), &ctx).unwrap();
        let result = outcome.score().unwrap();

        assert_eq!(result.capped_total, result.pre_cap_total.min(max_fan));
        assert_eq!(result.multiplier, 2);
        assert_eq!(result.final_score, 3 * result.capped_total * 2);
    }
}
