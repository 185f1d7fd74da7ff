use arbor_blocks::config::{BlockDef, BlocksConfig};
use arbor_blocks::registry::BlockRegistry;
use arbor_blocks::types::Block;
use proptest::prelude::*;

#[test]
fn toml_defaults_fill_missing_fields() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"
        solid = false
        replaceable = true

        [[blocks]]
        name = "stone"

        [[blocks]]
        name = "oak_leaves"
        leaves = true
    "#,
    )
    .expect("registry");

    let air = reg.make_block_by_name("air").unwrap();
    let stone = reg.make_block_by_name("stone").unwrap();
    let leaves = reg.make_block_by_name("oak_leaves").unwrap();

    assert_eq!(air, Block::AIR);
    assert!(!reg.is_solid(air));
    assert!(reg.can_be_replaced(air));

    // solid defaults to true, every flag to false
    assert!(reg.is_solid(stone));
    assert!(!reg.can_be_replaced(stone));
    assert!(!reg.is_sapling(stone));
    assert!(!reg.is_leaves(stone));

    assert!(reg.is_leaves(leaves));
}

#[test]
fn unknown_names_and_ids_are_inert() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"
        solid = false
        replaceable = true
    "#,
    )
    .expect("registry");

    assert!(reg.make_block_by_name("bedrock").is_none());
    let stray = Block { id: 999 };
    assert!(!reg.is_solid(stray));
    assert!(!reg.can_be_replaced(stray));
    assert!(!reg.is_sapling(stray));
    assert!(!reg.is_leaves(stray));
}

#[test]
fn explicit_id_gap_leaves_unnamed_placeholders() {
    let cfg = BlocksConfig {
        blocks: vec![
            BlockDef {
                name: "air".into(),
                id: Some(0),
                solid: Some(false),
                replaceable: Some(true),
                sapling: None,
                leaves: None,
            },
            BlockDef {
                name: "dirt".into(),
                id: Some(4),
                solid: None,
                replaceable: None,
                sapling: None,
                leaves: None,
            },
        ],
    };
    let reg = BlockRegistry::from_configs(cfg).expect("registry");
    assert_eq!(reg.blocks.len(), 5);
    assert_eq!(reg.id_by_name("dirt"), Some(4));
    // Placeholder slots have no name and are not reachable by lookup.
    assert!(reg.get(2).unwrap().name.is_empty());
    assert_eq!(reg.by_name.len(), 2);
    assert!(!reg.is_solid(Block { id: 2 }));
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(BlockRegistry::from_toml_str("[[blocks]]\nsolid = true").is_err());
}

proptest! {
    // Sequentially defined blocks keep a consistent name <-> id mapping
    // and report exactly the flags they were compiled from.
    #[test]
    fn flags_roundtrip(flags in prop::collection::vec(any::<(bool, bool, bool, bool)>(), 1..24)) {
        let cfg = BlocksConfig {
            blocks: flags
                .iter()
                .enumerate()
                .map(|(i, &(solid, replaceable, sapling, leaves))| BlockDef {
                    name: format!("block_{i}"),
                    id: None,
                    solid: Some(solid),
                    replaceable: Some(replaceable),
                    sapling: Some(sapling),
                    leaves: Some(leaves),
                })
                .collect(),
        };
        let reg = BlockRegistry::from_configs(cfg).expect("registry");
        for (i, &(solid, replaceable, sapling, leaves)) in flags.iter().enumerate() {
            let name = format!("block_{i}");
            let id = reg.id_by_name(&name).expect("id");
            prop_assert_eq!(id as usize, i);
            let b = reg.make_block_by_name(&name).expect("block");
            prop_assert_eq!(reg.is_solid(b), solid);
            prop_assert_eq!(reg.can_be_replaced(b), replaceable);
            prop_assert_eq!(reg.is_sapling(b), sapling);
            prop_assert_eq!(reg.is_leaves(b), leaves);
        }
    }
}
