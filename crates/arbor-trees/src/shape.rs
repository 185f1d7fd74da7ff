use arbor_blocks::BlockRegistry;
use arbor_blocks::types::Block;
use arbor_rng::WorldRng;
use arbor_world::{VoxelGrid, WriteBatch};

/// Why a tree could not be constructed.
#[derive(Debug)]
pub enum TreeError {
    InvalidHeight(i32),
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::InvalidHeight(h) => {
                write!(f, "tree height must be at least 1, got {h}")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Closed set of species-specific behaviors. Variants differ only in
/// materials, target height, and the trunk-height formula.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TreeKind {
    Oak,
    Birch { tall: bool },
    Spruce,
    Jungle,
}

pub(crate) const DEFAULT_HEIGHT: i32 = 7;

/// A plantable tree shape: trunk and leaf materials plus a target height,
/// all fixed at construction.
#[derive(Clone, Debug)]
pub struct Tree {
    kind: TreeKind,
    trunk_block: Block,
    leaf_block: Block,
    height: i32,
}

/// Registry lookup with the lenient air fallback used for world blocks.
fn block_or_air(reg: &BlockRegistry, name: &str) -> Block {
    reg.make_block_by_name(name).unwrap_or(Block::AIR)
}

impl Tree {
    /// Baseline-shaped tree from arbitrary materials. Heights below 1
    /// make the canopy math degenerate and are rejected here.
    pub fn new(trunk_block: Block, leaf_block: Block, height: i32) -> Result<Self, TreeError> {
        if height < 1 {
            return Err(TreeError::InvalidHeight(height));
        }
        Ok(Self::with_kind(TreeKind::Oak, trunk_block, leaf_block, height))
    }

    pub(crate) fn with_kind(
        kind: TreeKind,
        trunk_block: Block,
        leaf_block: Block,
        height: i32,
    ) -> Self {
        debug_assert!(height >= 1);
        Self {
            kind,
            trunk_block,
            leaf_block,
            height,
        }
    }

    pub fn oak(reg: &BlockRegistry) -> Self {
        Self::with_kind(
            TreeKind::Oak,
            block_or_air(reg, "oak_log"),
            block_or_air(reg, "oak_leaves"),
            DEFAULT_HEIGHT,
        )
    }

    /// The tall sub-variant grows three blocks higher than the default.
    pub fn birch(reg: &BlockRegistry, tall: bool) -> Self {
        let height = if tall {
            DEFAULT_HEIGHT + 3
        } else {
            DEFAULT_HEIGHT
        };
        Self::with_kind(
            TreeKind::Birch { tall },
            block_or_air(reg, "birch_log"),
            block_or_air(reg, "birch_leaves"),
            height,
        )
    }

    pub fn spruce(reg: &BlockRegistry) -> Self {
        Self::with_kind(
            TreeKind::Spruce,
            block_or_air(reg, "spruce_log"),
            block_or_air(reg, "spruce_leaves"),
            10,
        )
    }

    pub fn jungle(reg: &BlockRegistry) -> Self {
        Self::with_kind(
            TreeKind::Jungle,
            block_or_air(reg, "jungle_log"),
            block_or_air(reg, "jungle_leaves"),
            8,
        )
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the full vertical and radial footprint is free of
    /// permanent obstructions. Read-only; short-circuits on the first
    /// blocked cell.
    ///
    /// The scan covers `height + 3` layers above the base. The checked
    /// radius starts at 0 and widens by one at layer 1 and again at the
    /// nominal height, tracking the canopy bulge.
    pub fn can_place<G: VoxelGrid>(
        &self,
        grid: &G,
        reg: &BlockRegistry,
        x: i32,
        y: i32,
        z: i32,
    ) -> bool {
        let mut radius = 0;
        for yy in 0..self.height + 3 {
            if yy == 1 || yy == self.height {
                radius += 1;
            }
            for xx in -radius..radius + 1 {
                for zz in -radius..radius + 1 {
                    if !self.can_override(reg, grid.block_at(x + xx, y + yy, z + zz)) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Stamp the tree into the grid. The sole mutating operation; callers
    /// are expected to have passed `can_place` first — this does not
    /// re-check. Returns whether every buffered write landed; a failed
    /// flush is not rolled back.
    pub fn place<G: VoxelGrid>(
        &self,
        grid: &mut G,
        reg: &BlockRegistry,
        x: i32,
        y: i32,
        z: i32,
        rng: &mut WorldRng,
    ) -> bool {
        let mut write = WriteBatch::new();
        let trunk_height = self.trunk_height(rng);
        self.place_trunk(grid, reg, x, y, z, trunk_height, &mut write);
        self.place_canopy(grid, reg, x, y, z, rng, &mut write);
        write.apply(grid)
    }

    /// Trunk column height for this placement. Kinds with a randomized
    /// formula consume their draws here, before any canopy draw.
    fn trunk_height(&self, rng: &mut WorldRng) -> i32 {
        match self.kind {
            TreeKind::Spruce => self.height - rng.next_bounded_int(3) as i32,
            _ => self.height - 1,
        }
    }

    fn place_trunk<G: VoxelGrid>(
        &self,
        grid: &G,
        reg: &BlockRegistry,
        x: i32,
        y: i32,
        z: i32,
        trunk_height: i32,
        write: &mut WriteBatch,
    ) {
        // The foundation block below the base is stamped unconditionally,
        // bypassing the overridable check every other cell goes through.
        write.add_block_at(x, y - 1, z, block_or_air(reg, "dirt"));

        for yy in 0..trunk_height {
            if self.can_override(reg, write.fetch_block_at(grid, x, y + yy, z)) {
                write.add_block_at(x, y + yy, z, self.trunk_block);
            }
        }
    }

    fn place_canopy<G: VoxelGrid>(
        &self,
        grid: &G,
        reg: &BlockRegistry,
        x: i32,
        y: i32,
        z: i32,
        rng: &mut WorldRng,
        write: &mut WriteBatch,
    ) {
        for yy in (y - 3 + self.height)..=(y + self.height) {
            let y_off = yy - (y + self.height);
            // Truncating division: the half-width grows every two layers
            // below the apex.
            let mid = 1 - y_off / 2;
            for xx in (x - mid)..=(x + mid) {
                let x_off = (xx - x).abs();
                for zz in (z - mid)..=(z + mid) {
                    let z_off = (zz - z).abs();
                    // Outer corners drop out at the apex always, below it
                    // on a coin flip. The apex skip consumes no draw.
                    let corner = x_off == mid && z_off == mid;
                    if corner && (y_off == 0 || rng.next_bounded_int(2) == 0) {
                        continue;
                    }
                    if !reg.is_solid(write.fetch_block_at(grid, xx, yy, zz)) {
                        write.add_block_at(xx, yy, zz, self.leaf_block);
                    }
                }
            }
        }
    }

    /// Blocks the generator may replace: trivially replaceable filler,
    /// saplings, and leaves. Solid terrain and liquids never qualify.
    fn can_override(&self, reg: &BlockRegistry, b: Block) -> bool {
        reg.can_be_replaced(b) || reg.is_sapling(b) || reg.is_leaves(b)
    }
}
