use std::fmt;
use std::str::FromStr;

/// 麻将牌类型
///
/// 国标麻将使用 136 张牌（万、筒、条各 36 张，风牌 16 张，箭牌 12 张）外加 8 张花牌。
/// 相等与排序按（花色，数字）比较，派生的 `Ord` 正好满足这一点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// 万子（1-9）
    Wan(u8),
    /// 筒子（1-9）
    Tong(u8),
    /// 条子（1-9）
    Tiao(u8),
    /// 风牌（1 东，2 南，3 西，4 北）
    Wind(u8),
    /// 箭牌（1 中，2 发，3 白）
    Dragon(u8),
    /// 花牌（1-8，不参与组牌）
    Flower(u8),
}

impl Tile {
    /// 牌的种类数（27 种序数牌 + 4 种风牌 + 3 种箭牌）
    pub const KINDS: usize = 34;

    /// 每种牌的数量
    pub const COPIES: u8 = 4;

    /// 创建一张牌，验证输入有效性
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if rank == 0 || rank > suit.max_rank() {
            return None;
        }
        Some(match suit {
            Suit::Wan => Tile::Wan(rank),
            Suit::Tong => Tile::Tong(rank),
            Suit::Tiao => Tile::Tiao(rank),
            Suit::Wind => Tile::Wind(rank),
            Suit::Dragon => Tile::Dragon(rank),
            Suit::Flower => Tile::Flower(rank),
        })
    }

    /// 获取花色
    pub fn suit(&self) -> Suit {
        match self {
            Tile::Wan(_) => Suit::Wan,
            Tile::Tong(_) => Suit::Tong,
            Tile::Tiao(_) => Suit::Tiao,
            Tile::Wind(_) => Suit::Wind,
            Tile::Dragon(_) => Suit::Dragon,
            Tile::Flower(_) => Suit::Flower,
        }
    }

    /// 获取数字
    pub fn rank(&self) -> u8 {
        match self {
            Tile::Wan(r) | Tile::Tong(r) | Tile::Tiao(r) | Tile::Wind(r) | Tile::Dragon(r) | Tile::Flower(r) => *r,
        }
    }

    /// 数字是否在花色允许的范围内（枚举可以直接构造，外部输入需要校验）
    pub fn is_valid(&self) -> bool {
        Tile::new(self.suit(), self.rank()).is_some()
    }

    /// 序数牌（万、筒、条）
    #[inline]
    pub fn is_numeral(&self) -> bool {
        self.suit().is_numeral()
    }

    /// 字牌（风牌、箭牌）
    #[inline]
    pub fn is_honor(&self) -> bool {
        matches!(self, Tile::Wind(_) | Tile::Dragon(_))
    }

    #[inline]
    pub fn is_flower(&self) -> bool {
        matches!(self, Tile::Flower(_))
    }

    /// 幺九牌（序数 1 或 9）
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_numeral() && (self.rank() == 1 || self.rank() == 9)
    }

    #[inline]
    pub fn is_terminal_or_honor(&self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    /// 绿一色用牌：2、3、4、6、8 条和发财
    pub fn is_green(&self) -> bool {
        matches!(self, Tile::Tiao(2 | 3 | 4 | 6 | 8) | Tile::Dragon(2))
    }

    /// 推不倒用牌（图案上下对称）：1234589 筒、245689 条、白板
    pub fn is_reversible(&self) -> bool {
        matches!(
            self,
            Tile::Tong(1 | 2 | 3 | 4 | 5 | 8 | 9) | Tile::Tiao(2 | 4 | 5 | 6 | 8 | 9) | Tile::Dragon(3)
        )
    }

    /// 转换为计数表索引（0-33）
    ///
    /// - 万子：0-8
    /// - 筒子：9-17
    /// - 条子：18-26
    /// - 风牌：27-30
    /// - 箭牌：31-33
    ///
    /// 花牌没有索引
    pub fn to_index(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let rank = self.rank() as usize;
        match self {
            Tile::Wan(_) => Some(rank - 1),
            Tile::Tong(_) => Some(9 + rank - 1),
            Tile::Tiao(_) => Some(18 + rank - 1),
            Tile::Wind(_) => Some(27 + rank - 1),
            Tile::Dragon(_) => Some(31 + rank - 1),
            Tile::Flower(_) => None,
        }
    }

    /// 从计数表索引创建牌
    pub fn from_index(index: usize) -> Option<Self> {
        let tile = match index {
            0..=8 => Tile::Wan(index as u8 + 1),
            9..=17 => Tile::Tong((index - 9) as u8 + 1),
            18..=26 => Tile::Tiao((index - 18) as u8 + 1),
            27..=30 => Tile::Wind((index - 27) as u8 + 1),
            31..=33 => Tile::Dragon((index - 31) as u8 + 1),
            _ => return None,
        };
        Some(tile)
    }

    /// 同花色序数牌平移 `delta`（越界或非序数牌返回 None）
    pub fn offset(&self, delta: i8) -> Option<Self> {
        if !self.is_numeral() {
            return None;
        }
        let rank = self.rank() as i8 + delta;
        if !(1..=9).contains(&rank) {
            return None;
        }
        Tile::new(self.suit(), rank as u8)
    }

    /// 全部 34 种牌（按索引顺序）
    pub fn all_kinds() -> impl Iterator<Item = Tile> {
        (0..Self::KINDS).filter_map(Tile::from_index)
    }
}

/// 花色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Wan = 0,
    Tong = 1,
    Tiao = 2,
    Wind = 3,
    Dragon = 4,
    Flower = 5,
}

impl Suit {
    /// 三种序数花色
    pub fn numerals() -> [Suit; 3] {
        [Suit::Wan, Suit::Tong, Suit::Tiao]
    }

    #[inline]
    pub fn is_numeral(&self) -> bool {
        matches!(self, Suit::Wan | Suit::Tong | Suit::Tiao)
    }

    /// 该花色的最大数字
    pub fn max_rank(&self) -> u8 {
        match self {
            Suit::Wan | Suit::Tong | Suit::Tiao => 9,
            Suit::Wind => 4,
            Suit::Dragon => 3,
            Suit::Flower => 8,
        }
    }
}

/// 风位（门风、圈风）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Wind {
    #[default]
    East,
    South,
    West,
    North,
}

impl Wind {
    /// 对应的风牌
    pub fn tile(&self) -> Tile {
        Tile::Wind(*self as u8 + 1)
    }
}

/// 牌代码解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileParseError(pub String);

impl fmt::Display for TileParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid tile code: {}", self.0)
    }
}

impl std::error::Error for TileParseError {}

fn suit_from_code(code: char) -> Option<Suit> {
    match code {
        'm' => Some(Suit::Wan),
        'p' => Some(Suit::Tong),
        's' => Some(Suit::Tiao),
        'f' => Some(Suit::Flower),
        _ => None,
    }
}

/// 字牌代码：1-4z 为东南西北，5-7z 为中发白
fn honor_from_digit(digit: u8) -> Option<Tile> {
    match digit {
        1..=4 => Some(Tile::Wind(digit)),
        5..=7 => Some(Tile::Dragon(digit - 4)),
        _ => None,
    }
}

fn tile_from_digit(digit: u8, suit_code: char) -> Option<Tile> {
    if suit_code == 'z' {
        return honor_from_digit(digit);
    }
    Tile::new(suit_from_code(suit_code)?, digit)
}

impl FromStr for Tile {
    type Err = TileParseError;

    /// 单张牌代码，例如 `5m`、`9p`、`1s`、`7z`、`3f`
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let bytes = code.as_bytes();
        if bytes.len() != 2 || !bytes[0].is_ascii_digit() {
            return Err(TileParseError(code.to_string()));
        }
        tile_from_digit(bytes[0] - b'0', bytes[1] as char).ok_or_else(|| TileParseError(code.to_string()))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Wan(r) => write!(f, "{}m", r),
            Tile::Tong(r) => write!(f, "{}p", r),
            Tile::Tiao(r) => write!(f, "{}s", r),
            Tile::Wind(r) => write!(f, "{}z", r),
            Tile::Dragon(r) => write!(f, "{}z", r + 4),
            Tile::Flower(r) => write!(f, "{}f", r),
        }
    }
}

/// 解析紧凑的牌串，例如 `123m456p789s11z`
///
/// 数字在前，花色字母在后，字母作用于它前面所有尚未归属的数字
pub fn parse_tiles(text: &str) -> Result<Vec<Tile>, TileParseError> {
    let mut tiles = Vec::with_capacity(14);
    let mut pending: Vec<u8> = Vec::new();
    for ch in text.chars().filter(|c| !c.is_whitespace()) {
        if let Some(digit) = ch.to_digit(10) {
            pending.push(digit as u8);
            continue;
        }
        if pending.is_empty() {
            return Err(TileParseError(text.to_string()));
        }
        for digit in pending.drain(..) {
            let tile = tile_from_digit(digit, ch).ok_or_else(|| TileParseError(format!("{}{}", digit, ch)))?;
            tiles.push(tile);
        }
    }
    if !pending.is_empty() {
        return Err(TileParseError(text.to_string()));
    }
    Ok(tiles)
}
