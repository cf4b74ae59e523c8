use fan_engine::tile::{parse_tiles, Meld, Tile};
use fan_engine::{can_win, score_win, waiting_tiles, ScoringContext, ScoringEngine, ScoringRules, WinOutcome};
use std::sync::Arc;
use std::thread;

fn tiles(code: &str) -> Vec<Tile> {
    parse_tiles(code).unwrap()
}

#[test]
fn test_score_win_is_deterministic() {
    let concealed = tiles("11122233344455m");
    let concealed = &concealed[..13];
    let ctx = ScoringContext::new().with_self_draw(true).with_flowers(2);

    let first = score_win(concealed, &[], Tile::Wan(5), &ctx).unwrap();
    for _ in 0..50 {
        assert_eq!(score_win(concealed, &[], Tile::Wan(5), &ctx).unwrap(), first);
    }
}

#[test]
fn test_end_to_end_self_drawn_is_additive() {
    // 123 456 789 万 + 111 筒 + 55 筒，自摸 5 筒，非庄家，无杠
    let engine = ScoringEngine::new(ScoringRules::default().with_base_score(2));
    let ctx = ScoringContext::new().with_self_draw(true);
    let outcome = engine.score_win(&tiles("123456789m111p5p"), &[], Tile::Tong(5), &ctx).unwrap();
    let result = outcome.score().unwrap();

    assert!(result.has_fan("self_drawn"));
    assert!(result.has_fan("pure_straight"));
    assert!(result.has_fan("fully_concealed_hand"));
    // 自摸只加番，不产生倍率
    assert_eq!(result.pre_cap_total, result.fans.iter().map(|f| f.points).sum::<u32>());
    assert!(result.bonuses.is_empty());
    assert_eq!(result.multiplier, 1);
    assert_eq!(result.capped_total, 10);
    assert_eq!(result.final_score, 2 * result.capped_total);
}

#[test]
fn test_isolated_tile_only_wins_on_its_pair() {
    let concealed = tiles("123m456m789m111p5s");
    let ctx = ScoringContext::new();
    for candidate in Tile::all_kinds() {
        let wins = can_win(&concealed, &[], candidate, &ctx).unwrap();
        assert_eq!(wins, candidate == Tile::Tiao(5), "candidate {}", candidate);
    }
}

#[test]
fn test_shape_sensitivity() {
    let ctx = ScoringContext::new();
    assert!(can_win(&tiles("123m456m789m111p5p"), &[], Tile::Tong(5), &ctx).unwrap());
    assert_eq!(
        score_win(&tiles("123m456m789m111p5p"), &[], Tile::Tong(6), &ctx).unwrap(),
        WinOutcome::NoValidDecomposition
    );
    assert_eq!(
        score_win(&tiles("123m456m788m111p5p"), &[], Tile::Tong(5), &ctx).unwrap(),
        WinOutcome::NoValidDecomposition
    );
}

#[test]
fn test_zero_fan_hand_cannot_win() {
    let melds = [Meld::chow(Tile::Wan(2)), Meld::chow(Tile::Tong(5)), Meld::pung(Tile::Tiao(8))];
    let ctx = ScoringContext::new();

    assert_eq!(
        score_win(&tiles("34s11z"), &melds, Tile::Tiao(5), &ctx).unwrap(),
        WinOutcome::ShapeValidButUnscored
    );
    assert!(!can_win(&tiles("34s11z"), &melds, Tile::Tiao(5), &ctx).unwrap());
    // 牌型本身仍然成立
    assert_eq!(waiting_tiles(&tiles("34s11z"), &melds).unwrap(), vec![Tile::Tiao(2), Tile::Tiao(5)]);
}

#[test]
fn test_concurrent_evaluation() {
    let engine = Arc::new(ScoringEngine::new(ScoringRules::default().with_max_fan(88)));
    let hands = Arc::new(vec![
        (tiles("123456789m111p5p"), Tile::Tong(5)),
        (tiles("1112345678999m"), Tile::Wan(5)),
        (tiles("19m19p19s1234567z"), Tile::Wind(3)),
        (tiles("112233557m99p11z"), Tile::Wan(7)),
    ]);
    let ctx = ScoringContext::new().with_self_draw(true);
    let expected: Vec<WinOutcome> = hands
        .iter()
        .map(|(concealed, winning)| engine.score_win(concealed, &[], *winning, &ctx).unwrap())
        .collect();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let hands = Arc::clone(&hands);
            thread::spawn(move || {
                hands
                    .iter()
                    .map(|(concealed, winning)| engine.score_win(concealed, &[], *winning, &ctx).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), expected);
    }
}
