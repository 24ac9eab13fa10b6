// rust/engine/src/engine/render.rs
#![forbid(unsafe_code)]

use crate::engine::constants::{EMPTY_GLYPH, MARKER_GLYPH, WALL_GLYPH};
use crate::engine::grid::{Cell, Grid};
use crate::engine::hero::Hero;

const ANSI_BLUE: &str = "\x1b[94m";
const ANSI_GREEN: &str = "\x1b[92m";
const ANSI_YELLOW: &str = "\x1b[93m";
const ANSI_RESET: &str = "\x1b[0m";

/// Cosmetic knobs for the diagnostic canvas. None of them touch world state.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Printed before the first row; later rows are indented by its width.
    pub prefix: String,
    /// Collapse marker counts into the plain marker glyph.
    pub skip_number: bool,
    /// ANSI highlighting for hero, markers and prefix.
    pub with_color: bool,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn colored() -> Self {
        Self {
            with_color: true,
            ..Self::default()
        }
    }
}

/// Single-digit count glyph. Stacks above 9 are drawn as `9`; the exact count is
/// available from `Grid::marker_count`.
fn count_glyph(count: u32) -> char {
    char::from_digit(count.min(9), 10).unwrap_or('9')
}

/// Raw character canvas: one `Vec<char>` per row, hero drawn last.
pub fn canvas(grid: &Grid, hero: &Hero) -> Vec<Vec<char>> {
    let mut rows: Vec<Vec<char>> = (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| match grid.cell(x, y) {
                    Some(Cell::Wall) => WALL_GLYPH,
                    _ => EMPTY_GLYPH,
                })
                .collect()
        })
        .collect();

    for ((x, y), count) in grid.marker_cells() {
        if let Some(c) = rows
            .get_mut(y as usize)
            .and_then(|r| r.get_mut(x as usize))
        {
            *c = count_glyph(count);
        }
    }

    let (hx, hy) = hero.position;
    if hx >= 0 && hy >= 0 {
        if let Some(c) = rows
            .get_mut(hy as usize)
            .and_then(|r| r.get_mut(hx as usize))
        {
            *c = hero.facing.glyph();
        }
    }
    rows
}

fn colorize(c: char) -> String {
    if "^v<>".contains(c) {
        format!("{ANSI_GREEN}{c}{ANSI_RESET}")
    } else if c == MARKER_GLYPH {
        format!("{ANSI_YELLOW}{c}{ANSI_RESET}")
    } else {
        c.to_string()
    }
}

/// Render rows of text according to `opts`.
pub fn render(grid: &Grid, hero: &Hero, opts: &RenderOptions) -> Vec<String> {
    let indent = " ".repeat(opts.prefix.chars().count());

    canvas(grid, hero)
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let body: String = row
                .into_iter()
                .map(|c| {
                    let c = if opts.skip_number && c.is_ascii_digit() {
                        MARKER_GLYPH
                    } else {
                        c
                    };
                    if opts.with_color {
                        colorize(c)
                    } else {
                        c.to_string()
                    }
                })
                .collect();

            let lead = match (idx, opts.with_color) {
                (0, true) if !opts.prefix.is_empty() => {
                    format!("{ANSI_BLUE}{}{ANSI_RESET}", opts.prefix)
                }
                (0, _) => opts.prefix.clone(),
                _ => indent.clone(),
            };
            format!("{lead}{body}")
        })
        .collect()
}
