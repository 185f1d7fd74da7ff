use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::types::{Block, BlockId};

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub replaceable: bool,
    pub sapling: bool,
    pub leaves: bool,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            replaceable: false,
            sapling: false,
            leaves: false,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn make_block_by_name(&self, name: &str) -> Option<Block> {
        Some(Block {
            id: self.id_by_name(name)?,
        })
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            let ty = BlockType {
                id,
                name: def.name,
                solid: def.solid.unwrap_or(true),
                replaceable: def.replaceable.unwrap_or(false),
                sapling: def.sapling.unwrap_or(false),
                leaves: def.leaves.unwrap_or(false),
            };
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }
        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();
        Ok(reg)
    }

    // Capability predicates. Ids the registry does not know answer false
    // everywhere, which keeps unknown blocks inert.

    #[inline]
    pub fn is_solid(&self, b: Block) -> bool {
        self.get(b.id).map(|t| t.solid).unwrap_or(false)
    }

    #[inline]
    pub fn can_be_replaced(&self, b: Block) -> bool {
        self.get(b.id).map(|t| t.replaceable).unwrap_or(false)
    }

    #[inline]
    pub fn is_sapling(&self, b: Block) -> bool {
        self.get(b.id).map(|t| t.sapling).unwrap_or(false)
    }

    #[inline]
    pub fn is_leaves(&self, b: Block) -> bool {
        self.get(b.id).map(|t| t.leaves).unwrap_or(false)
    }
}
