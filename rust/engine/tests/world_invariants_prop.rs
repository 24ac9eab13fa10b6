// rust/engine/tests/world_invariants_prop.rs
#![forbid(unsafe_code)]

/**
 * Property/invariant tests for the world state machine.
 *
 * Purpose:
 * - Provide fuzz-like coverage using generated seeds, sizes, maps and action streams.
 * - Lock invariants that must hold regardless of which driver is calling the world.
 *
 * Invariants covered:
 * - `from_tensor(to_tensor(w))` reproduces random and map-built worlds.
 * - Random and map-built worlds have a wall border and a hero on an empty cell.
 * - A blocked `move` changes nothing and returns false; a clear one advances one cell.
 * - Four left turns, or right-then-left, restore the facing.
 * - pick-then-put on a cell with markers restores its count.
 * - Encoded tensors stay one-hot under arbitrary action streams.
 */
use karel_engine::{
    Action, Cell, Facing, MarkerBag, NUM_CHANNELS, RandomWorldSpec, World, WorldOptions,
};
use proptest::prelude::*;

fn spec_strategy() -> impl Strategy<Value = RandomWorldSpec> {
    (3usize..14, 3usize..14, 0.0f64..0.6, 0.0f64..0.8).prop_map(
        |(height, width, wall_ratio, marker_ratio)| RandomWorldSpec {
            height,
            width,
            wall_ratio,
            marker_ratio,
        },
    )
}

/// Rectangular map text with exactly one hero glyph.
fn map_strategy() -> impl Strategy<Value = String> {
    (1usize..7, 1usize..7).prop_flat_map(|(h, w)| {
        let cells = prop::collection::vec(
            prop::sample::select(vec!['#', '.', '.', '.', 'o', '0', '1', '3', '9']),
            h * w,
        );
        (cells, 0..h * w, prop::sample::select(vec!['^', 'v', '<', '>'])).prop_map(
            move |(mut cells, hero_at, glyph)| {
                cells[hero_at] = glyph;
                cells
                    .chunks(w)
                    .map(|row| row.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        )
    })
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::all().to_vec())
}

fn assert_one_hot(w: &World) -> Result<(), TestCaseError> {
    let t = w.to_tensor();
    let (h, wd, c) = t.dim();
    prop_assert_eq!((h, wd, c), (w.height(), w.width(), NUM_CHANNELS));

    let mut facing_bits = 0u32;
    for y in 0..h {
        for x in 0..wd {
            facing_bits += (0..4).map(|ch| u32::from(t[[y, x, ch]])).sum::<u32>();
            let marker_bits: u32 = (5..16).map(|ch| u32::from(t[[y, x, ch]])).sum();
            prop_assert_eq!(marker_bits, 1);
        }
    }
    prop_assert_eq!(facing_bits, 1);
    Ok(())
}

proptest! {
    #[test]
    fn random_world_roundtrips_through_tensor(spec in spec_strategy(), seed in any::<u64>()) {
        let w = World::random_seeded(&spec, seed, WorldOptions::default()).unwrap();
        let back = World::from_tensor(w.to_tensor().view(), WorldOptions::default()).unwrap();
        prop_assert_eq!(&back, &w);
    }

    #[test]
    fn map_world_roundtrips_through_tensor(text in map_strategy()) {
        let w = World::from_map_str(&text, WorldOptions::default()).unwrap();
        let back = World::from_tensor(w.to_tensor().view(), WorldOptions::default()).unwrap();
        prop_assert_eq!(back.grid(), w.grid());
        prop_assert_eq!(back.hero(), w.hero());
    }

    #[test]
    fn constructed_worlds_have_wall_border(
        spec in spec_strategy(),
        seed in any::<u64>(),
        text in map_strategy(),
    ) {
        let r = World::random_seeded(&spec, seed, WorldOptions::default()).unwrap();
        let m = World::from_map_str(&text, WorldOptions::default()).unwrap();
        for w in [&r, &m] {
            prop_assert!(w.grid().border_is_wall());
            let (x, y) = w.hero_position();
            prop_assert_eq!(w.grid().cell(x, y), Some(Cell::Empty));
        }
    }

    #[test]
    fn moves_respect_walls_over_action_streams(
        spec in spec_strategy(),
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..120),
    ) {
        let mut w = World::random_seeded(&spec, seed, WorldOptions::default()).unwrap();

        for a in actions {
            if a == Action::Move {
                let before = w.clone();
                let clear = w.front_is_clear();
                let moved = w.move_forward();
                prop_assert_eq!(moved, clear);
                if clear {
                    let (dx, dy) = before.facing().vector();
                    let (x, y) = before.hero_position();
                    prop_assert_eq!(w.hero_position(), (x + dx, y + dy));
                } else {
                    prop_assert_eq!(&w, &before);
                }
            } else {
                w.act(a);
            }

            let (x, y) = w.hero_position();
            prop_assert_eq!(w.grid().cell(x, y), Some(Cell::Empty));
        }
        assert_one_hot(&w)?;
    }

    #[test]
    fn turns_are_closed_over_the_four_facings(start in 0usize..4) {
        let glyph = Facing::from_idx(start).unwrap().glyph();
        let mut w = World::from_map_str(&format!(".{glyph}."), WorldOptions::default()).unwrap();
        let f0 = w.facing();

        for _ in 0..4 {
            w.turn_left();
            prop_assert!(Facing::all().contains(&w.facing()));
        }
        prop_assert_eq!(w.facing(), f0);

        w.turn_right();
        prop_assert_ne!(w.facing(), f0);
        w.turn_left();
        prop_assert_eq!(w.facing(), f0);
    }

    #[test]
    fn pick_then_put_restores_marker_count(n in 1u32..10, bounded in any::<bool>()) {
        let opts = WorldOptions {
            marker_bag: if bounded { MarkerBag::Bounded(0) } else { MarkerBag::Unbounded },
            ..WorldOptions::default()
        };
        let mut w = World::from_map_str(&format!(".>{n}"), opts).unwrap();
        w.move_forward();
        prop_assert_eq!(w.markers_here(), n);

        w.pick_marker();
        prop_assert_eq!(w.markers_here(), n - 1);
        prop_assert_eq!(w.put_marker(), n);
        prop_assert_eq!(w.markers_here(), n);
    }

    #[test]
    fn empty_bounded_bag_pick_then_put_restores_any_cell(text in map_strategy()) {
        let opts = WorldOptions { marker_bag: MarkerBag::Bounded(0), ..WorldOptions::default() };
        let mut w = World::from_map_str(&text, opts).unwrap();
        let before = w.markers_here();

        w.pick_marker();
        prop_assert_eq!(w.put_marker(), before);
        prop_assert_eq!(w.hero().bag, MarkerBag::Bounded(0));
    }
}
