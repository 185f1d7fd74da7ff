use arbor_blocks::BlockRegistry;
use arbor_rng::WorldRng;
use arbor_world::VoxelGrid;

use crate::shape::Tree;

/// Species tags a planting request can carry. Reserved entries are
/// accepted and currently resolve to nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeSpecies {
    Oak,
    Birch,
    Spruce,
    Jungle,
    Acacia,
    DarkOak,
}

impl TreeSpecies {
    pub fn from_name(name: &str) -> Option<TreeSpecies> {
        match name {
            "oak" => Some(TreeSpecies::Oak),
            "birch" => Some(TreeSpecies::Birch),
            "spruce" => Some(TreeSpecies::Spruce),
            "jungle" => Some(TreeSpecies::Jungle),
            "acacia" => Some(TreeSpecies::Acacia),
            "dark_oak" => Some(TreeSpecies::DarkOak),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TreeSpecies::Oak => "oak",
            TreeSpecies::Birch => "birch",
            TreeSpecies::Spruce => "spruce",
            TreeSpecies::Jungle => "jungle",
            TreeSpecies::Acacia => "acacia",
            TreeSpecies::DarkOak => "dark_oak",
        }
    }
}

/// Plant one tree at `(x, y, z)`, defaulting to oak.
///
/// Resolves the species to a concrete shape (Birch draws a 1-in-39 chance
/// of its tall sub-variant; reserved species resolve to nothing without
/// consuming a draw), checks feasibility, and only then places.
/// Unsupported species and blocked footprints are both silent no-ops —
/// the grid is the only witness to the outcome. A failed flush is logged
/// and otherwise ignored; nothing is rolled back.
pub fn grow_tree<G: VoxelGrid>(
    grid: &mut G,
    reg: &BlockRegistry,
    x: i32,
    y: i32,
    z: i32,
    rng: &mut WorldRng,
    species: Option<TreeSpecies>,
) {
    let tree = match species.unwrap_or(TreeSpecies::Oak) {
        TreeSpecies::Spruce => Some(Tree::spruce(reg)),
        TreeSpecies::Birch => {
            if rng.next_bounded_int(39) == 0 {
                Some(Tree::birch(reg, true))
            } else {
                Some(Tree::birch(reg, false))
            }
        }
        TreeSpecies::Jungle => Some(Tree::jungle(reg)),
        TreeSpecies::Oak => Some(Tree::oak(reg)),
        // Reserved species without a concrete shape yet.
        TreeSpecies::Acacia | TreeSpecies::DarkOak => None,
    };

    if let Some(tree) = tree {
        if tree.can_place(grid, reg, x, y, z) && !tree.place(grid, reg, x, y, z, rng) {
            log::warn!("tree flush rejected at ({x}, {y}, {z}); partial writes kept");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_names_roundtrip() {
        for sp in [
            TreeSpecies::Oak,
            TreeSpecies::Birch,
            TreeSpecies::Spruce,
            TreeSpecies::Jungle,
            TreeSpecies::Acacia,
            TreeSpecies::DarkOak,
        ] {
            assert_eq!(TreeSpecies::from_name(sp.name()), Some(sp));
        }
        assert_eq!(TreeSpecies::from_name("palm"), None);
    }
}
