use super::tile::{parse_tiles, Tile};
use crate::game::game_engine::HandError;
use crate::utils::TileCounts;

/// 手牌（Hand）
///
/// 只保存暗手中的牌，已声明的牌组（吃/碰/杠）以 `&[Meld]` 的形式跟随传递。
/// 内部使用 34 槽计数表，添加、移除、查询都是 O(1)。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hand {
    tiles: TileCounts,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self { tiles: TileCounts::new() }
    }

    /// 从牌列表创建手牌
    ///
    /// 花牌、非法数字或同一张牌超过 4 张都会被拒绝
    pub fn from_tiles(tiles: &[Tile]) -> Result<Self, HandError> {
        let mut hand = Self::new();
        for &tile in tiles {
            if tile.is_flower() {
                return Err(HandError::FlowerInHand(tile));
            }
            if !tile.is_valid() {
                return Err(HandError::InvalidTile(tile));
            }
            if !hand.add_tile(tile) {
                return Err(HandError::TooManyCopies(tile));
            }
        }
        Ok(hand)
    }

    /// 从紧凑牌串创建手牌，例如 `123m456p789s1122z`
    pub fn from_code(code: &str) -> Result<Self, HandError> {
        let tiles = parse_tiles(code).map_err(|e| HandError::InvalidTileCode(e.0))?;
        Self::from_tiles(&tiles)
    }

    /// 添加一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功添加
    /// - `false`：该牌已有 4 张，或是花牌
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        self.tiles.add(tile)
    }

    /// 移除一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        self.tiles.remove(tile)
    }

    /// 加入一张牌后的新手牌（原手牌不变）
    pub fn with_tile(&self, tile: Tile) -> Option<Self> {
        let mut hand = self.clone();
        if hand.add_tile(tile) {
            Some(hand)
        } else {
            None
        }
    }

    /// 查询某张牌的数量
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.tiles.count(tile)
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.tiles.total()
    }

    /// 计数表（拆牌使用）
    pub fn counts(&self) -> &TileCounts {
        &self.tiles
    }
}
