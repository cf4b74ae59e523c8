use crate::tile::{Suit, Tile};

/// 牌计数表
///
/// 34 个槽位，索引与 [`Tile::to_index`] 一致：
/// 万子 0-8、筒子 9-17、条子 18-26、风牌 27-30、箭牌 31-33。
///
/// 拆牌递归直接在这张表上做“移除 / 恢复”，不需要复制手牌。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCounts {
    counts: [u8; Tile::KINDS],
    total: usize,
}

impl TileCounts {
    /// 创建空表
    pub fn new() -> Self {
        Self {
            counts: [0; Tile::KINDS],
            total: 0,
        }
    }

    /// 从牌列表构建（花牌被忽略）
    pub fn from_tiles<'a, I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        let mut counts = Self::new();
        for tile in tiles {
            counts.add(*tile);
        }
        counts
    }

    /// 添加一张牌
    ///
    /// 花牌或已有 4 张时返回 `false`
    #[inline]
    pub fn add(&mut self, tile: Tile) -> bool {
        self.add_n(tile, 1)
    }

    /// 添加 `n` 张同样的牌
    pub fn add_n(&mut self, tile: Tile, n: u8) -> bool {
        match tile.to_index() {
            Some(idx) if self.counts[idx].saturating_add(n) <= Tile::COPIES => {
                self.counts[idx] += n;
                self.total += n as usize;
                true
            }
            _ => false,
        }
    }

    /// 移除一张牌
    #[inline]
    pub fn remove(&mut self, tile: Tile) -> bool {
        match tile.to_index() {
            Some(idx) => self.take(idx, 1),
            None => false,
        }
    }

    /// 按索引取出 `n` 张（数量不足时不做修改）
    #[inline]
    pub fn take(&mut self, idx: usize, n: u8) -> bool {
        if self.counts[idx] < n {
            return false;
        }
        self.counts[idx] -= n;
        self.total -= n as usize;
        true
    }

    /// 按索引放回 `n` 张（与 [`take`](Self::take) 配对使用）
    #[inline]
    pub fn restore(&mut self, idx: usize, n: u8) {
        self.counts[idx] += n;
        self.total += n as usize;
    }

    /// 查询某张牌的数量
    #[inline]
    pub fn count(&self, tile: Tile) -> u8 {
        tile.to_index().map_or(0, |idx| self.counts[idx])
    }

    /// 按索引查询数量
    #[inline]
    pub fn count_at(&self, idx: usize) -> u8 {
        self.counts[idx]
    }

    /// 总牌数
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// 第一个非零槽位（从 `start` 开始）
    pub fn first_nonzero(&self, start: usize) -> Option<usize> {
        (start..Tile::KINDS).find(|&idx| self.counts[idx] > 0)
    }

    /// 遍历所有数量非零的牌
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .filter_map(|(idx, &count)| Tile::from_index(idx).map(|tile| (tile, count)))
    }

    /// 不同牌的种类数
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// 某花色的牌数
    pub fn suit_total(&self, suit: Suit) -> usize {
        self.iter().filter(|(tile, _)| tile.suit() == suit).map(|(_, count)| count as usize).sum()
    }

}

impl Default for TileCounts {
    fn default() -> Self {
        Self::new()
    }
}
