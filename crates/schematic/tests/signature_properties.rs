mod common;

use common::*;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use schematic::prelude::*;
use schematic::schematic_core::{
    build_signature, Connection, ConnectionInfo, NodeInfo, ShapeCell,
};

const DRAFTS: [&str; 5] = ["pump", "tank", "pipe", "twin-a", "twin-b"];

fn arb_connection() -> impl Strategy<Value = Option<Connection>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(Connection::input(code("water")))),
        1 => Just(Some(Connection::output(code("power")))),
    ]
}

fn arb_shape() -> impl Strategy<Value = DraftShape> {
    (1..4i32, 1..4i32).prop_flat_map(|(w, h)| {
        let cells = (0..w * h).map(|i| (i % w, i / w)).collect::<Vec<_>>();
        proptest::sample::subsequence(cells, 1..=(w * h) as usize)
            .prop_flat_map(move |picked| {
                let count = picked.len();
                (
                    Just(picked),
                    proptest::collection::vec(proptest::array::uniform4(arb_connection()), count),
                )
            })
            .prop_map(move |(picked, conns)| {
                let cells = picked
                    .into_iter()
                    .zip(conns)
                    .map(|((x, y), c)| ShapeCell::with_connections(x, y, c))
                    .collect();
                DraftShape::new(cells, w, h, code("shape"), u32::MAX).unwrap()
            })
    })
}

fn arb_placements() -> impl Strategy<Value = Vec<(usize, i32, i32, u8)>> {
    proptest::collection::vec((0..DRAFTS.len(), 0..6i32, 0..6i32, 0..4u8), 0..10)
}

fn arb_node() -> impl Strategy<Value = NodeInfo> {
    (prop::sample::select(vec!["a", "b", "c"]), 0..2u32).prop_map(|(p, n)| NodeInfo::new(code(p), n))
}

fn arb_edge() -> impl Strategy<Value = ConnectionInfo> {
    (
        prop::sample::select(vec!["a", "b", "c"]),
        prop::sample::select(vec!["a", "b", "c"]),
    )
        .prop_map(|(f, t)| ConnectionInfo::new(code(f), code(t), code("water")))
}

fn arb_signature() -> impl Strategy<Value = CanonicalSignature> {
    (
        proptest::collection::vec(arb_node(), 1..4),
        proptest::collection::vec(arb_edge(), 0..3),
    )
        .prop_map(|(nodes, edges)| CanonicalSignature::from_parts(nodes, edges))
}

fn arb_recipes() -> impl Strategy<Value = Vec<SchematicRecipe>> {
    proptest::collection::vec((arb_signature(), any::<bool>()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (signature, enabled))| {
                let mut recipe = SchematicRecipe::new(
                    format!("r{i}"),
                    ItemStack::block(game("tank-block"), 1),
                    Vec::new(),
                    signature,
                )
                .unwrap();
                recipe.enabled = enabled;
                recipe
            })
            .collect()
    })
}

/// Place `placements` on a board large enough for any offset, skipping rejected ones.
fn place(assets: &DraftAssets, placements: &[(usize, i32, i32, u8)]) -> DraftLayout {
    let mut layout = DraftLayout::new(16, 16);
    for &(draft, x, y, rotation) in placements {
        layout.try_add(code(DRAFTS[draft]), (x, y), rotation, assets);
    }
    layout
}

proptest! {
    #[test]
    fn rotation_is_cyclic(shape in arb_shape()) {
        prop_assert_eq!(shape.rotate(1).rotate(3), shape.clone());
        prop_assert_eq!(shape.rotate(2).rotate(2), shape.clone());
        prop_assert_eq!(shape.rotate(4), shape.clone());
        prop_assert_eq!(shape.rotate(1).connection_count(), shape.connection_count());
    }

    #[test]
    fn signature_ignores_translation(
        placements in arb_placements(),
        dx in -20..20i32,
        dy in -20..20i32,
    ) {
        let assets = assets();
        let layout = place(&assets, &placements);
        let moved: Vec<PlacedDraft> = layout
            .drafts()
            .iter()
            .map(|d| d.translated(dx, dy))
            .collect();
        prop_assert_eq!(
            build_signature(&moved, &*assets),
            layout.signature(&*assets)
        );
    }

    #[test]
    fn lookup_agrees_with_linear_scan(recipes in arb_recipes(), query in arb_signature()) {
        let index = RecipeIndex::new(recipes);
        let mut found: Vec<usize> = index.lookup(&query).iter().map(|r| r.id).collect();
        found.sort_unstable();
        let expected: Vec<usize> = index
            .iter()
            .filter(|r| r.enabled && r.signature() == &query)
            .map(|r| r.id)
            .collect();
        prop_assert_eq!(found, expected);

        for recipe in index.iter() {
            let hits = index.lookup(recipe.signature());
            prop_assert_eq!(hits.iter().any(|r| r.id == recipe.id), recipe.enabled);
        }
    }
}

#[test]
fn placement_order_does_not_change_signature() {
    let assets = assets();
    let chain = vec![
        PlacedDraft::new(code("pump"), (0, 0), 0),
        PlacedDraft::new(code("pipe"), (1, 0), 0),
        PlacedDraft::new(code("pipe"), (2, 0), 0),
        PlacedDraft::new(code("tank"), (3, 0), 0),
        PlacedDraft::new(code("twin-a"), (0, 2), 0),
        PlacedDraft::new(code("twin-b"), (1, 2), 0),
    ];
    let expected = build_signature(&chain, &*assets);
    assert_eq!(expected.connections().len(), 5);

    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..32 {
        let mut shuffled = chain.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(build_signature(&shuffled, &*assets), expected);
    }
}

#[test]
fn empty_index_finds_nothing() {
    let index = RecipeIndex::default();
    let query = CanonicalSignature::from_parts(vec![NodeInfo::new(code("pump"), 0)], Vec::new());
    assert!(index.lookup(&query).is_empty());
    assert!(index.lookup(&CanonicalSignature::default()).is_empty());
}
