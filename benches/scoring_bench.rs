use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fan_engine::game::context::{LastAction, ScoringContext};
use fan_engine::game::scoring::ScoreCalculator;
use fan_engine::{parse_tiles, score_win, Meld, Tile};

fn bench_score_win(c: &mut Criterion) {
    let tiles = parse_tiles("12345678m111p55p").unwrap();
    let ctx = ScoringContext::new().with_self_draw(true);

    c.bench_function("score_win_pure_straight", |b| {
        b.iter(|| {
            black_box(score_win(black_box(&tiles), &[], Tile::Wan(9), &ctx).unwrap());
        });
    });
}

fn bench_score_win_ambiguous(c: &mut Criterion) {
    // 每种拆法、每个胡牌张位置都要计算一遍番种表
    let tiles = parse_tiles("1112223334445m").unwrap();
    let ctx = ScoringContext::new();

    c.bench_function("score_win_ambiguous", |b| {
        b.iter(|| {
            black_box(score_win(black_box(&tiles), &[], Tile::Wan(5), &ctx).unwrap());
        });
    });
}

fn bench_score_win_with_melds(c: &mut Criterion) {
    let tiles = parse_tiles("123m4p").unwrap();
    let melds = [Meld::pung(Tile::Wind(1)), Meld::pung(Tile::Wind(2)), Meld::pung(Tile::Wind(3))];
    let ctx = ScoringContext::new();

    c.bench_function("score_win_with_melds", |b| {
        b.iter(|| {
            black_box(score_win(black_box(&tiles), &melds, Tile::Tong(4), &ctx).unwrap());
        });
    });
}

fn bench_compute(c: &mut Criterion) {
    let calculator = ScoreCalculator::new(10);
    let ctx = ScoringContext::new()
        .with_dealer(true)
        .with_self_draw(true)
        .with_last_action(LastAction::ReplacementDraw)
        .with_consecutive_kongs(2);

    c.bench_function("score_calculator_compute", |b| {
        b.iter(|| {
            black_box(calculator.compute(black_box(8), black_box(&ctx)));
        });
    });
}

criterion_group!(
    benches,
    bench_score_win,
    bench_score_win_ambiguous,
    bench_score_win_with_melds,
    bench_compute
);
criterion_main!(benches);
