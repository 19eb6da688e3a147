#![allow(dead_code)]

use schematic::prelude::*;
use std::sync::Arc;

pub const CONNECTIONS: &str = r#"[
    { "code": "water", "textures": { "input": "conn/water-in", "output": "conn/water-out", "connected": "conn/water" } },
    { "code": "power", "textures": { "input": "conn/power-in", "output": "conn/power-out", "connected": "conn/power" } }
]"#;

pub const PUMP: &str = r##"{ "code": "pump", "shape": ["#"], "texture": "pump", "groups": ["Plumbing"],
    "cells": { "#": { "outputs": { "right": "water" } } } }"##;
pub const TANK: &str = r##"{ "code": "tank", "shape": ["#"], "texture": "tank",
    "cells": { "#": { "inputs": { "left": "water" } } } }"##;
pub const PIPE: &str = r##"{ "code": "pipe", "shape": ["#"], "texture": "pipe",
    "cells": { "#": { "inputs": { "l": "water" }, "outputs": { "r": "water" } } } }"##;
/// Two tall drafts that feed each other when placed side by side.
pub const TWIN_A: &str = r##"{ "code": "twin-a", "shape": ["o", "i"], "texture": "twin",
    "cells": { "o": { "outputs": { "right": "water" } }, "i": { "inputs": { "right": "water" } } } }"##;
pub const TWIN_B: &str = r##"{ "code": "twin-b", "shape": ["i", "o"], "texture": "twin",
    "cells": { "i": { "inputs": { "left": "water" } }, "o": { "outputs": { "left": "water" } } } }"##;

pub const RECIPES: &str = r#"[
    {
        "name": "water-tank",
        "output": { "type": "block", "code": "game:tank-block" },
        "ingredients": [{ "code": "game:ironore", "quantity": 2 }],
        "pattern": {
            "p0": { "code": "pump", "outputs": [{ "target": "t0", "type": "water" }] },
            "t0": { "code": "tank" }
        }
    },
    {
        "name": "water-tank-disabled",
        "enabled": false,
        "output": { "type": "block", "code": "game:tank-block" },
        "pattern": {
            "p0": { "code": "pump", "outputs": [{ "target": "t0", "type": "water" }] },
            "t0": { "code": "tank" }
        }
    },
    {
        "name": "pipeline",
        "output": { "type": "block", "code": "game:pipe-block" },
        "ingredients": [{ "code": "game:hammer", "isTool": true, "toolDurabilityCost": 5 }],
        "pattern": {
            "p0": { "code": "pump", "outputs": [{ "target": "p1", "type": "water" }] },
            "p1": { "code": "pipe", "outputs": [{ "target": "t0", "type": "water" }] },
            "t0": { "code": "tank" }
        }
    },
    {
        "name": "ghost",
        "output": { "type": "block", "code": "game:tank-block" },
        "pattern": { "g0": { "code": "ghost" } }
    }
]"#;

pub fn code(path: &str) -> AssetCode {
    AssetCode::new("drafts", path)
}

pub fn game(path: &str) -> AssetCode {
    AssetCode::new("game", path)
}

pub fn collectibles() -> CollectibleTable {
    let mut table = CollectibleTable::new();
    table
        .insert(ItemClass::Item, game("ironore"))
        .insert(ItemClass::Item, game("hammer"))
        .insert(ItemClass::Block, game("tank-block"))
        .insert(ItemClass::Block, game("pipe-block"))
        .insert_liquid(game("water"), 100.0);
    table
}

pub fn sources_with(drafts: &[(&str, &str)]) -> AssetSources {
    AssetSources {
        connection_types: vec![AssetDocument::new("connections.json", "drafts", CONNECTIONS)],
        drafts: drafts
            .iter()
            .map(|(name, json)| AssetDocument::new(format!("{name}.json"), "drafts", *json))
            .collect(),
        recipes: vec![AssetDocument::new("recipes.json", "drafts", RECIPES)],
    }
}

pub fn sources() -> AssetSources {
    sources_with(&[
        ("pump", PUMP),
        ("tank", TANK),
        ("pipe", PIPE),
        ("twin-a", TWIN_A),
        ("twin-b", TWIN_B),
    ])
}

pub fn assets() -> Arc<DraftAssets> {
    Arc::new(DraftAssets::load(&sources(), &collectibles(), &LoadSettings::default()))
}

pub fn ore(count: u32) -> ItemSlot {
    ItemSlot::new(ItemStack::item(game("ironore"), count))
}

pub fn hammer(durability: u32) -> ItemSlot {
    ItemSlot::new(ItemStack::item(game("hammer"), 1).with_durability(durability))
}
