//! 可执行文件入口（用于测试和调试）
//!
//! 用法：`fan_engine <暗手> <胡牌张> [副露...]`，例如
//! `fan_engine 12345678m111p55p 9m pung:7z`

use fan_engine::{parse_tiles, score_win, Meld, ScoringContext, Tile, WinOutcome};

fn main() {
    println!("国标麻将计分引擎测试");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (concealed, winning) = match args.as_slice() {
        [concealed, winning, ..] => (concealed.as_str(), winning.as_str()),
        _ => ("12345678m111p55p", "9m"),
    };

    let tiles = match parse_tiles(concealed) {
        Ok(tiles) => tiles,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let winning: Tile = match winning.parse() {
        Ok(tile) => tile,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let melds: Vec<Meld> = match args.iter().skip(2).map(|m| m.parse()).collect() {
        Ok(melds) => melds,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let context = ScoringContext::new().with_self_draw(true);
    println!("手牌：{} + {}，副露 {} 组（自摸）", concealed, winning, melds.len());

    match score_win(&tiles, &melds, winning, &context) {
        Ok(WinOutcome::Scored(result)) => {
            for fan in &result.fans {
                println!("  {:<36} {:>2} 番 × {}", fan.name, fan.tier.points(), fan.count);
            }
            println!(
                "共 {} 番（封顶 {}），倍率 ×{}，得分 {}",
                result.pre_cap_total, result.capped_total, result.multiplier, result.final_score
            );
        }
        Ok(WinOutcome::ShapeValidButUnscored) => println!("牌型成立，但没有番种，不能胡"),
        Ok(WinOutcome::NoValidDecomposition) => println!("不是胡牌牌型"),
        Err(e) => eprintln!("手牌错误：{}", e),
    }
}
