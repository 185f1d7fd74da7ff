pub type BlockId = u16;

/// A block value as stored in the grid: a plain numeric id. Capability
/// questions (solid, replaceable, ...) are answered by the registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
}

impl Block {
    /// Id 0 is air by convention; unregistered cells read back as this.
    pub const AIR: Block = Block { id: 0 };
}
