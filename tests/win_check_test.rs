use fan_engine::tile::{Hand, Meld, Tile, WinChecker, WinShape};
use fan_engine::HandError;

fn hand(code: &str) -> Hand {
    Hand::from_code(code).unwrap()
}

#[test]
fn test_standard_hand() {
    let h = hand("123m456p789s11122z");
    assert!(WinChecker::is_winning(&h, &[]));

    let decompositions = WinChecker::decompose(&h, &[]).unwrap();
    assert_eq!(decompositions.len(), 1);
    let d = &decompositions[0];
    assert_eq!(d.shape, WinShape::Standard);
    assert_eq!(d.pair, Some(Tile::Wind(2)));
    assert_eq!(d.groups.len(), 4);
}

#[test]
fn test_every_partition_is_produced() {
    // 111222333444万 + 55万：四刻、三同顺 + 刻子等多种拆法
    let decompositions = WinChecker::decompose(&hand("11122233344455m"), &[]).unwrap();
    assert!(decompositions.len() >= 2);
    assert!(decompositions.iter().all(|d| d.shape == WinShape::Standard));
    assert!(decompositions
        .iter()
        .any(|d| d.groups.iter().all(|g| g.is_pung_like())));
    assert!(decompositions.iter().any(|d| d.groups.iter().any(|g| g.is_chow())));
}

#[test]
fn test_seven_pairs_is_exclusive() {
    // 同样可以拆成 123 123 456 456 + 77，但只返回七对
    let decompositions = WinChecker::decompose(&hand("11223344556677m"), &[]).unwrap();
    assert_eq!(decompositions.len(), 1);
    assert_eq!(decompositions[0].shape, WinShape::SevenPairs);
}

#[test]
fn test_four_of_a_kind_is_not_two_pairs() {
    let decompositions = WinChecker::decompose(&hand("11112233445566m"), &[]).unwrap();
    assert!(!decompositions.is_empty());
    assert!(decompositions.iter().all(|d| d.shape == WinShape::Standard));
}

#[test]
fn test_thirteen_orphans() {
    let decompositions = WinChecker::decompose(&hand("19m19p19s12345677z"), &[]).unwrap();
    assert_eq!(decompositions.len(), 1);
    assert_eq!(decompositions[0].shape, WinShape::ThirteenOrphans);
}

#[test]
fn test_honors_and_knitted() {
    let decompositions = WinChecker::decompose(&hand("147m258p369s12345z"), &[]).unwrap();
    assert_eq!(decompositions.len(), 1);
    assert_eq!(decompositions[0].shape, WinShape::HonorsAndKnitted);
    assert!(decompositions[0].knitted.is_some());
}

#[test]
fn test_knitted_straight() {
    // 组合龙 + 中刻 + 白板对
    let decompositions = WinChecker::decompose(&hand("147m258p369s55577z"), &[]).unwrap();
    assert_eq!(decompositions.len(), 1);
    let d = &decompositions[0];
    assert_eq!(d.shape, WinShape::KnittedStraight);
    assert_eq!(d.pair, Some(Tile::Dragon(3)));
    assert_eq!(d.groups.len(), 1);
}

#[test]
fn test_declared_melds_are_groups() {
    let melds = [Meld::pung(Tile::Wind(1)), Meld::chow(Tile::Tiao(2)), Meld::kong(Tile::Dragon(1))];
    let h = hand("456p99s");
    let decompositions = WinChecker::decompose(&h, &melds).unwrap();
    assert_eq!(decompositions.len(), 1);

    let d = &decompositions[0];
    assert_eq!(d.groups.len(), 4);
    assert_eq!(d.groups.iter().filter(|g| g.is_declared).count(), 3);
    assert!(d.groups.iter().any(|g| g.is_kong() && !g.is_concealed));
}

#[test]
fn test_shape_sensitivity() {
    assert!(WinChecker::is_winning(&hand("123m456m789m111p55p"), &[]));
    // 将牌换一张
    assert!(!WinChecker::is_winning(&hand("123m456m789m111p56p"), &[]));
    // 顺子换一张
    assert!(!WinChecker::is_winning(&hand("12345678m111p55p9s"), &[]));
}

#[test]
fn test_wrong_count_is_error() {
    assert_eq!(
        WinChecker::decompose(&hand("123m456m789m111p5p"), &[]),
        Err(HandError::TileCount { expected: 14, actual: 13 })
    );
    assert!(!WinChecker::is_winning(&hand("123m"), &[]));
}

#[test]
fn test_waiting_tiles() {
    // 九莲宝灯听 1-9 万
    let waits = WinChecker::waiting_tiles(&hand("1112345678999m"), &[]).unwrap();
    assert_eq!(waits, (1..=9).map(Tile::Wan).collect::<Vec<_>>());

    // 十三幺十三面听
    let waits = WinChecker::waiting_tiles(&hand("19m19p19s1234567z"), &[]).unwrap();
    assert_eq!(waits.len(), 13);

    let waits = WinChecker::waiting_tiles(&hand("123m456m789m111p5s"), &[]).unwrap();
    assert_eq!(waits, vec![Tile::Tiao(5)]);
}
