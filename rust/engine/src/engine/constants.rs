// rust/engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Smallest legal world side: one ring of walls around a single interior cell.
pub const MIN_SIDE: usize = 3;

/// Largest marker count the tensor form can represent per cell.
pub const MAX_MARKERS: u32 = 10;

/**
 * Per-cell tensor layout.
 *
 * - 0..4   one-hot hero facing (North, South, West, East), set only on the hero cell
 * - 4      wall
 * - 5..16  one-hot marker count clipped to [0, MAX_MARKERS]
 */
pub const FACING_CHANNELS: usize = 4;
pub const WALL_CHANNEL: usize = FACING_CHANNELS;
pub const MARKER_CHANNEL_BASE: usize = WALL_CHANNEL + 1;
pub const NUM_CHANNELS: usize = MARKER_CHANNEL_BASE + MAX_MARKERS as usize + 1;

pub const WALL_GLYPH: char = '#';
pub const EMPTY_GLYPH: char = '.';
pub const MARKER_GLYPH: char = 'o';

#[inline]
pub fn marker_channel(count: u32) -> usize {
    MARKER_CHANNEL_BASE + count.min(MAX_MARKERS) as usize
}
