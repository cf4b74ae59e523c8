use fan_engine::tile::{parse_tiles, Hand, Meld, Tile};
use fan_engine::{can_win, score_win, waiting_tiles, HandError, ScoringContext};

fn tiles(code: &str) -> Vec<Tile> {
    parse_tiles(code).unwrap()
}

#[test]
fn test_wrong_tile_count() {
    let ctx = ScoringContext::new();
    assert_eq!(
        score_win(&tiles("123m456m789m11p"), &[], Tile::Tong(1), &ctx),
        Err(HandError::TileCount { expected: 13, actual: 11 })
    );
    // 副露按 3 张计
    let melds = [Meld::pung(Tile::Wind(1))];
    assert_eq!(
        can_win(&tiles("123m456m789m111p"), &melds, Tile::Tong(5), &ctx),
        Err(HandError::TileCount { expected: 13, actual: 15 })
    );
}

#[test]
fn test_too_many_copies() {
    let ctx = ScoringContext::new();
    // 胡牌张是第五张
    assert_eq!(
        score_win(&tiles("1111m234567899p"), &[], Tile::Wan(1), &ctx),
        Err(HandError::TooManyCopies(Tile::Wan(1)))
    );
    // 暗手与副露合计超过 4 张
    let melds = [Meld::pung(Tile::Wan(1))];
    assert_eq!(
        score_win(&tiles("11m23456789p"), &melds, Tile::Tong(9), &ctx),
        Err(HandError::TooManyCopies(Tile::Wan(1)))
    );
}

#[test]
fn test_flowers_are_rejected() {
    let ctx = ScoringContext::new();
    assert_eq!(
        score_win(&tiles("123m456m789m111p5p"), &[], Tile::Flower(2), &ctx),
        Err(HandError::FlowerInHand(Tile::Flower(2)))
    );
    assert_eq!(
        Hand::from_tiles(&[Tile::Wan(1), Tile::Flower(1)]),
        Err(HandError::FlowerInHand(Tile::Flower(1)))
    );
}

#[test]
fn test_invalid_melds() {
    let ctx = ScoringContext::new();
    // 字牌不能吃
    let melds = [Meld::chow(Tile::Wind(1))];
    assert_eq!(
        score_win(&tiles("456m789m111p5p"), &melds, Tile::Tong(5), &ctx),
        Err(HandError::InvalidMeld(melds[0]))
    );

    let melds = [Meld::pung(Tile::Wan(1)); 5];
    assert_eq!(
        score_win(&[], &melds, Tile::Tong(5), &ctx),
        Err(HandError::TooManyMelds(5))
    );
}

#[test]
fn test_invalid_tiles() {
    assert!(parse_tiles("0m").is_err());
    assert!(parse_tiles("8z").is_err());
    assert!(parse_tiles("123").is_err());
    assert!(matches!(Hand::from_code("12x"), Err(HandError::InvalidTileCode(_))));
    assert_eq!(
        waiting_tiles(&[Tile::Tiao(12)], &[]),
        Err(HandError::InvalidTile(Tile::Tiao(12)))
    );
}

#[test]
fn test_waiting_tiles_needs_thirteen() {
    assert_eq!(
        waiting_tiles(&tiles("123m456m789m111p55p"), &[]),
        Err(HandError::TileCount { expected: 13, actual: 14 })
    );
}

#[test]
fn test_four_melds_single_wait() {
    // 四副露单钓
    let melds = [
        Meld::pung(Tile::Wan(2)),
        Meld::chow(Tile::Tong(3)),
        Meld::kong(Tile::Tiao(6)),
        Meld::pung(Tile::Dragon(1)),
    ];
    let ctx = ScoringContext::new();
    let outcome = score_win(&tiles("7z"), &melds, Tile::Dragon(3), &ctx).unwrap();
    let result = outcome.score().unwrap();
    assert!(result.has_fan("melded_hand"));
    assert!(!result.has_fan("single_wait"));

    assert!(!can_win(&tiles("7z"), &melds, Tile::Dragon(2), &ctx).unwrap());
}
