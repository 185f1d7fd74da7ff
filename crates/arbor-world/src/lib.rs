//! Voxel grid access, an in-memory chunk store, and buffered write batches.
#![forbid(unsafe_code)]

use std::collections::HashMap;

use arbor_blocks::types::Block;

/// Read/write access to blocks by absolute world coordinate.
///
/// Implementations own their storage and bounds policy. Cells a store does
/// not hold read back as `Block::AIR`; `set_block_at` returns false for
/// writes the store rejects (e.g. outside its vertical band).
pub trait VoxelGrid {
    fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Block;
    fn set_block_at(&mut self, wx: i32, wy: i32, wz: i32, b: Block) -> bool;
}

/// Sparse block store with per-chunk maps and a fixed vertical band.
pub struct ChunkStore {
    sx: i32,
    sy: i32,
    sz: i32,
    min_y: i32,
    max_y: i32,
    // Map per-chunk: key=(cx,cy,cz) -> map of world coords -> Block
    inner: HashMap<(i32, i32, i32), HashMap<(i32, i32, i32), Block>>,
}

impl ChunkStore {
    /// `sx/sy/sz` are the chunk dimensions; writes land only in
    /// `min_y <= y < max_y`.
    pub fn new(sx: i32, sy: i32, sz: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            sx,
            sy,
            sz,
            min_y,
            max_y,
            inner: HashMap::new(),
        }
    }

    #[inline]
    fn chunk_key(&self, wx: i32, wy: i32, wz: i32) -> (i32, i32, i32) {
        (
            wx.div_euclid(self.sx),
            wy.div_euclid(self.sy),
            wz.div_euclid(self.sz),
        )
    }

    pub fn block_count(&self) -> usize {
        self.inner.values().map(|m| m.len()).sum()
    }

    /// Every stored cell, in no particular order.
    pub fn snapshot_all(&self) -> Vec<((i32, i32, i32), Block)> {
        self.inner
            .values()
            .flat_map(|m| m.iter().map(|(k, v)| (*k, *v)))
            .collect()
    }
}

impl VoxelGrid for ChunkStore {
    fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Block {
        if wy < self.min_y || wy >= self.max_y {
            return Block::AIR;
        }
        let k = self.chunk_key(wx, wy, wz);
        self.inner
            .get(&k)
            .and_then(|m| m.get(&(wx, wy, wz)).copied())
            .unwrap_or(Block::AIR)
    }

    fn set_block_at(&mut self, wx: i32, wy: i32, wz: i32, b: Block) -> bool {
        if wy < self.min_y || wy >= self.max_y {
            return false;
        }
        let k = self.chunk_key(wx, wy, wz);
        self.inner.entry(k).or_default().insert((wx, wy, wz), b);
        true
    }
}

/// Buffered block writes, applied to a grid in one pass.
///
/// Last write wins per coordinate; insertion order is preserved for the
/// apply pass. A batch is consumed by `apply` and never reused.
#[derive(Default)]
pub struct WriteBatch {
    entries: Vec<((i32, i32, i32), Block)>,
    index: HashMap<(i32, i32, i32), usize>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add_block_at(&mut self, wx: i32, wy: i32, wz: i32, b: Block) {
        let key = (wx, wy, wz);
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = b,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, b));
            }
        }
    }

    /// Buffered value if present, else the live grid.
    pub fn fetch_block_at(&self, grid: &impl VoxelGrid, wx: i32, wy: i32, wz: i32) -> Block {
        match self.index.get(&(wx, wy, wz)) {
            Some(&i) => self.entries[i].1,
            None => grid.block_at(wx, wy, wz),
        }
    }

    /// Flush every buffered write. Returns false if any write was
    /// rejected; writes that already landed stay in place.
    pub fn apply(self, grid: &mut impl VoxelGrid) -> bool {
        let mut ok = true;
        for ((wx, wy, wz), b) in self.entries {
            ok &= grid.set_block_at(wx, wy, wz, b);
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> ChunkStore {
        ChunkStore::new(16, 16, 16, 0, 128)
    }

    #[test]
    fn chunk_key_handles_negative_coordinates() {
        let mut store = make_store();
        let b = Block { id: 3 };
        assert!(store.set_block_at(-1, 0, -17, b));
        assert_eq!(store.block_at(-1, 0, -17), b);
        // Neighboring cells across the chunk seam stay empty.
        assert_eq!(store.block_at(0, 0, -17), Block::AIR);
        assert_eq!(store.block_at(-1, 0, -16), Block::AIR);
        assert_eq!(store.block_count(), 1);
    }

    #[test]
    fn vertical_band_rejects_writes_and_reads_air() {
        let mut store = make_store();
        let b = Block { id: 5 };
        assert!(!store.set_block_at(0, -1, 0, b));
        assert!(!store.set_block_at(0, 128, 0, b));
        assert!(store.set_block_at(0, 127, 0, b));
        assert_eq!(store.block_at(0, -1, 0), Block::AIR);
        assert_eq!(store.block_at(0, 128, 0), Block::AIR);
        assert_eq!(store.block_count(), 1);
    }

    #[test]
    fn batch_last_write_wins_per_coordinate() {
        let mut batch = WriteBatch::new();
        batch.add_block_at(1, 2, 3, Block { id: 7 });
        batch.add_block_at(4, 5, 6, Block { id: 8 });
        batch.add_block_at(1, 2, 3, Block { id: 9 });
        assert_eq!(batch.len(), 2);

        let mut store = make_store();
        assert!(batch.apply(&mut store));
        assert_eq!(store.block_at(1, 2, 3), Block { id: 9 });
        assert_eq!(store.block_at(4, 5, 6), Block { id: 8 });
    }

    #[test]
    fn fetch_prefers_buffered_over_live() {
        let mut store = make_store();
        store.set_block_at(0, 10, 0, Block { id: 2 });

        let mut batch = WriteBatch::new();
        assert_eq!(batch.fetch_block_at(&store, 0, 10, 0), Block { id: 2 });
        assert_eq!(batch.fetch_block_at(&store, 0, 11, 0), Block::AIR);

        batch.add_block_at(0, 10, 0, Block { id: 4 });
        assert_eq!(batch.fetch_block_at(&store, 0, 10, 0), Block { id: 4 });
        // The live grid is untouched until apply.
        assert_eq!(store.block_at(0, 10, 0), Block { id: 2 });
    }

    #[test]
    fn apply_reports_rejects_and_keeps_landed_writes() {
        let mut store = ChunkStore::new(16, 16, 16, 0, 20);
        let mut batch = WriteBatch::new();
        batch.add_block_at(0, 19, 0, Block { id: 1 });
        batch.add_block_at(0, 20, 0, Block { id: 1 });
        assert!(!batch.apply(&mut store));
        // No rollback: the in-band write stays.
        assert_eq!(store.block_at(0, 19, 0), Block { id: 1 });
        assert_eq!(store.block_at(0, 20, 0), Block::AIR);
    }
}
