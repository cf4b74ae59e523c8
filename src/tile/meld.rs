use super::{Tile, TileParseError};
use std::str::FromStr;

/// 副露类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeldKind {
    /// 吃（顺子）
    Chow,
    /// 碰（刻子）
    Pung,
    /// 杠（明杠/暗杠）
    Kong,
}

/// 已声明的牌组（吃/碰/杠）
///
/// `tile` 对顺子是最小的那张，对刻子/杠是组成它的那张牌。
/// 只有杠可以是暗的，暗杠与明杠分开计番。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub tile: Tile,
    pub is_concealed: bool,
}

impl Meld {
    /// 吃
    pub fn chow(first: Tile) -> Self {
        Self { kind: MeldKind::Chow, tile: first, is_concealed: false }
    }

    /// 碰
    pub fn pung(tile: Tile) -> Self {
        Self { kind: MeldKind::Pung, tile, is_concealed: false }
    }

    /// 明杠
    pub fn kong(tile: Tile) -> Self {
        Self { kind: MeldKind::Kong, tile, is_concealed: false }
    }

    /// 暗杠
    pub fn concealed_kong(tile: Tile) -> Self {
        Self { kind: MeldKind::Kong, tile, is_concealed: true }
    }

    /// 牌组是否合法
    ///
    /// - 顺子：序数牌，起始数字不超过 7
    /// - 刻子/杠：不能是花牌
    /// - 只有杠可以标记为暗
    pub fn is_valid(&self) -> bool {
        if !self.tile.is_valid() || self.tile.is_flower() {
            return false;
        }
        match self.kind {
            MeldKind::Chow => self.tile.is_numeral() && self.tile.rank() <= 7 && !self.is_concealed,
            MeldKind::Pung => !self.is_concealed,
            MeldKind::Kong => true,
        }
    }

    /// 牌组中的牌（杠为 4 张）
    pub fn tiles(&self) -> Vec<Tile> {
        match self.kind {
            MeldKind::Chow => (0..3).filter_map(|delta| self.tile.offset(delta)).collect(),
            MeldKind::Pung => vec![self.tile; 3],
            MeldKind::Kong => vec![self.tile; 4],
        }
    }

    #[inline]
    pub fn is_kong(&self) -> bool {
        self.kind == MeldKind::Kong
    }
}

impl FromStr for Meld {
    type Err = TileParseError;

    /// 副露代码，格式为 `chow:2m`、`pung:5z`、`kong:1p`、`concealed_kong:9s`
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || TileParseError(code.to_string());
        let (kind, tile) = code.split_once(':').ok_or_else(invalid)?;
        let tile: Tile = tile.parse().map_err(|_| invalid())?;
        match kind {
            "chow" => Ok(Meld::chow(tile)),
            "pung" => Ok(Meld::pung(tile)),
            "kong" => Ok(Meld::kong(tile)),
            "concealed_kong" => Ok(Meld::concealed_kong(tile)),
            _ => Err(invalid()),
        }
    }
}
