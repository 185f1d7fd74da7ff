use serde::Deserialize;

#[derive(Deserialize)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
}

/// One block definition as it appears in `blocks.toml`. Omitted fields
/// take their defaults when the registry is compiled: `solid` defaults to
/// true, every other flag to false, and `id` to the next free slot.
#[derive(Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub id: Option<u16>,
    pub solid: Option<bool>,
    pub replaceable: Option<bool>,
    pub sapling: Option<bool>,
    pub leaves: Option<bool>,
}
