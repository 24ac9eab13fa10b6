// rust/engine/tests/world_characterization.rs
#![forbid(unsafe_code)]

/**
 * World characterization tests.
 *
 * Purpose:
 * - Lock in the observable action/sensor contract on small hand-built worlds.
 * - Catch regressions in facing conventions, blocked-move handling and marker
 *   bookkeeping before deeper refactors.
 *
 * What is tested:
 * - The 5x5 move/pick/put walkthrough and the blocked-north corner case.
 * - Relative sensors (left/right are rotations of the facing vector).
 * - put_marker return values, stacking past the tensor cap, bounded bags.
 * - Seeded random generation is deterministic and honors its placement rules.
 */
use karel_engine::{
    Action, ActionOutcome, Cell, Facing, Grid, Hero, MarkerBag, RandomWorldSpec, Sensor, World,
    WorldOptions,
};

fn open_5x5_east() -> World {
    World::from_map_str("...\n.>o\n...\n", WorldOptions::default()).expect("valid map")
}

#[test]
fn walkthrough_move_pick_put_on_open_5x5() {
    let mut w = open_5x5_east();
    assert_eq!((w.height(), w.width()), (5, 5));
    assert_eq!(w.hero_position(), (2, 2));
    assert_eq!(w.facing(), Facing::East);
    assert_eq!(w.marker_count(3, 2), 1);

    assert!(w.move_forward());
    assert_eq!(w.hero_position(), (3, 2));
    assert!(w.markers_present());
    assert!(!w.no_markers_present());

    w.pick_marker();
    assert_eq!(w.marker_count(3, 2), 0);
    assert!(w.no_markers_present());

    assert_eq!(w.put_marker(), 1);
    assert_eq!(w.marker_count(3, 2), 1);
}

#[test]
fn hero_in_corner_facing_north_is_blocked() {
    let w0 = World::from_map_str("^..\n...\n", WorldOptions::default()).expect("valid map");
    let mut w = w0.clone();

    assert_eq!(w.hero_position(), (1, 1));
    assert!(!w.front_is_clear());
    assert!(!w.move_forward());
    assert_eq!(w, w0);
}

#[test]
fn relative_sensors_rotate_the_facing_vector() {
    // Hero at (2, 2) facing North; wall to the west at (1, 2), open to the east.
    let mut w =
        World::from_map_str("...\n#^.\n...\n", WorldOptions::default()).expect("valid map");

    assert!(w.front_is_clear());
    assert!(!w.left_is_clear());
    assert!(w.right_is_clear());

    w.turn_right(); // East
    assert_eq!(w.facing(), Facing::East);
    assert!(w.front_is_clear());
    assert!(w.left_is_clear());
    assert!(w.right_is_clear());

    w.turn_right(); // South
    assert!(w.front_is_clear());
    assert!(w.left_is_clear());
    assert!(!w.right_is_clear());
}

#[test]
fn markers_never_block_moves_or_sensors() {
    let mut w = World::from_map_str(">9o\n", WorldOptions::default()).expect("valid map");
    assert!(w.front_is_clear());
    assert!(w.move_forward());
    assert_eq!(w.markers_here(), 9);
    assert!(w.move_forward());
    assert_eq!(w.markers_here(), 1);
    assert!(!w.move_forward());
}

#[test]
fn act_and_sense_match_named_primitives() {
    let mut a = open_5x5_east();
    let mut b = a.clone();

    assert_eq!(a.act(Action::Move), ActionOutcome::Moved(true));
    assert!(b.move_forward());
    assert_eq!(a, b);

    assert_eq!(a.act(Action::PickMarker), ActionOutcome::Done);
    b.pick_marker();
    assert_eq!(a, b);

    assert_eq!(a.act(Action::PutMarker), ActionOutcome::MarkerCount(1));
    assert_eq!(b.put_marker(), 1);

    for &s in Sensor::all() {
        let named = match s {
            Sensor::FrontIsClear => b.front_is_clear(),
            Sensor::LeftIsClear => b.left_is_clear(),
            Sensor::RightIsClear => b.right_is_clear(),
            Sensor::MarkersPresent => b.markers_present(),
            Sensor::NoMarkersPresent => b.no_markers_present(),
        };
        assert_eq!(a.sense(s), named, "{}", s.name());
    }
}

#[test]
fn pick_on_empty_cell_is_a_silent_noop() {
    let mut w = World::from_map_str(".<.\n", WorldOptions::default()).expect("valid map");
    let before = w.clone();
    w.pick_marker();
    assert_eq!(w, before);
}

#[test]
fn put_marker_stacks_past_the_tensor_cap() {
    let mut w = open_5x5_east();
    for expected in 1..=12u32 {
        assert_eq!(w.put_marker(), expected);
    }
    assert_eq!(w.markers_here(), 12);

    // Only the clipped count is representable.
    let t = w.to_tensor();
    assert_eq!(t[[2, 2, 15]], 1);
}

#[test]
fn bounded_bag_is_opt_in_and_tracks_carried_markers() {
    let opts = WorldOptions {
        marker_bag: MarkerBag::Bounded(0),
        ..WorldOptions::default()
    };
    let mut w = World::from_map_str(".>2\n", opts).expect("valid map");

    // Empty bag: put is refused but still reports the cell count.
    assert_eq!(w.put_marker(), 0);
    assert_eq!(w.markers_here(), 0);

    assert!(w.move_forward());
    w.pick_marker();
    w.pick_marker();
    assert_eq!(w.hero().bag, MarkerBag::Bounded(2));
    assert_eq!(w.markers_here(), 0);

    // Picking from an empty cell does not credit the bag.
    w.pick_marker();
    assert_eq!(w.hero().bag, MarkerBag::Bounded(2));

    w.turn_left();
    w.turn_left();
    assert!(w.move_forward());
    assert_eq!(w.put_marker(), 1);
    assert_eq!(w.put_marker(), 2);
    assert_eq!(w.put_marker(), 2);
    assert_eq!(w.hero().bag, MarkerBag::Bounded(0));
}

#[test]
fn default_bag_is_unbounded() {
    let w = open_5x5_east();
    assert_eq!(w.hero().bag, MarkerBag::Unbounded);
    assert!(w.hero().holding_markers());
}

#[test]
fn from_parts_rejects_hero_on_wall_and_small_grids() {
    let grid = Grid::bordered(4, 4).expect("4x4 is legal");
    let hero = Hero::new((0, 0), Facing::East, MarkerBag::Unbounded);
    assert!(World::from_parts(grid.clone(), hero, WorldOptions::default()).is_err());

    let hero = Hero::new((1, 2), Facing::East, MarkerBag::Unbounded);
    let w = World::from_parts(grid, hero, WorldOptions::default()).expect("valid parts");
    assert_eq!(w.grid().cell(0, 0), Some(Cell::Wall));
    assert_eq!(w.grid().cell(1, 1), Some(Cell::Empty));

    assert!(Grid::bordered(2, 5).is_err());
}

#[test]
fn border_query_is_total_over_coordinates() {
    let g = Grid::bordered(4, 5).expect("4x5 is legal");

    assert!(g.is_border(0, 0));
    assert!(g.is_border(4, 2));
    assert!(g.is_border(2, 3));
    assert!(!g.is_border(1, 1));

    // Outside the matrix is never border, and never panics.
    for (x, y) in [(-1, 2), (2, -1), (-1, -1), (5, 1), (1, 4), (i32::MIN, 0), (0, i32::MAX)] {
        assert!(!g.is_border(x, y), "({x}, {y})");
        assert_eq!(g.cell(x, y), None);
    }
}

#[test]
fn seeded_random_worlds_are_deterministic() {
    let spec = RandomWorldSpec {
        height: 9,
        width: 7,
        wall_ratio: 0.25,
        marker_ratio: 0.3,
    };
    let a = World::random_seeded(&spec, 20260228, WorldOptions::default()).expect("valid spec");
    let b = World::random_seeded(&spec, 20260228, WorldOptions::default()).expect("valid spec");
    assert_eq!(a, b);
    assert_eq!(a.to_tensor(), b.to_tensor());
}

#[test]
fn random_world_placement_rules() {
    let spec = RandomWorldSpec {
        height: 10,
        width: 12,
        wall_ratio: 0.4,
        marker_ratio: 0.5,
    };
    for seed in 0..50u64 {
        let w = World::random_seeded(&spec, seed, WorldOptions::default()).expect("valid spec");
        let g = w.grid();
        assert!(g.border_is_wall());

        let (hx, hy) = w.hero_position();
        assert!(hx >= 1 && hx <= 10 && hy >= 1 && hy <= 8);
        assert_eq!(g.cell(hx, hy), Some(Cell::Empty));

        for ((x, y), n) in g.marker_cells() {
            assert_eq!(n, 1);
            assert!(!g.is_border(x, y));
            assert_eq!(g.cell(x, y), Some(Cell::Empty));
        }
    }
}

#[test]
fn random_generation_rejects_degenerate_sizes() {
    for (h, w) in [(2, 8), (8, 2), (0, 0)] {
        let spec = RandomWorldSpec::new(h, w);
        assert!(World::random_seeded(&spec, 1, WorldOptions::default()).is_err());
    }
    let spec = RandomWorldSpec::new(3, 3);
    let w = World::random_seeded(&spec, 1, WorldOptions::default()).expect("3x3 is legal");
    assert_eq!(w.hero_position(), (1, 1));
}

#[test]
fn trace_option_does_not_change_semantics() {
    let mut plain = open_5x5_east();
    let mut traced =
        World::from_map_str("...\n.>o\n...\n", WorldOptions::traced()).expect("valid map");

    for &a in [Action::Move, Action::PickMarker, Action::TurnLeft, Action::Move, Action::PutMarker]
        .iter()
    {
        assert_eq!(plain.act(a), traced.act(a));
        assert_eq!(plain.to_tensor(), traced.to_tensor());
    }
}
