// rust/engine/src/engine/map.rs
#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use crate::engine::constants::{EMPTY_GLYPH, MARKER_GLYPH, WALL_GLYPH};
use crate::engine::error::ConstructionError;
use crate::engine::facing::Facing;
use crate::engine::grid::{Cell, Grid};
use crate::engine::hero::{Hero, MarkerBag};

/**
 * Parse a text map into a grid and hero.
 *
 * Glyphs:
 * - `#` wall, `.` empty
 * - `^ v < >` hero facing North, South, West, East (exactly one per map)
 * - `o` one marker, `0`-`9` that many stacked markers
 *
 * Each line is trimmed and leading/trailing blank lines are dropped. A blank line
 * between rows is a ragged row. The parsed rectangle becomes the strict interior: one
 * ring of walls is added around it, so every recorded coordinate is offset by (+1, +1).
 */
pub fn parse_map(text: &str, bag: MarkerBag) -> Result<(Grid, Hero), ConstructionError> {
    let mut rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .skip_while(|(_, l)| l.is_empty())
        .collect();
    while rows.last().is_some_and(|(_, l)| l.is_empty()) {
        rows.pop();
    }

    let Some(&(_, first)) = rows.first() else {
        return Err(ConstructionError::EmptyMap);
    };
    let inner_w = first.chars().count();
    let inner_h = rows.len();

    let mut grid = Grid::open(inner_h + 2, inner_w + 2);
    grid.wall_border();

    let mut hero: Option<Hero> = None;

    for (row, &(line, text)) in rows.iter().enumerate() {
        let found = text.chars().count();
        if found != inner_w {
            return Err(ConstructionError::RaggedMap {
                line,
                found,
                expected: inner_w,
            });
        }

        let y = row as i32 + 1;
        for (col, c) in text.chars().enumerate() {
            let x = col as i32 + 1;
            match c {
                WALL_GLYPH => grid.set_cell(x, y, Cell::Wall),
                EMPTY_GLYPH => {}
                MARKER_GLYPH => grid.add_markers(x, y, 1),
                d if d.is_ascii_digit() => {
                    grid.add_markers(x, y, d.to_digit(10).unwrap_or(0));
                }
                g => match Facing::from_glyph(g) {
                    Some(facing) => {
                        if hero.is_some() {
                            return Err(ConstructionError::DuplicateHero {
                                line,
                                column: col + 1,
                            });
                        }
                        hero = Some(Hero::new((x, y), facing, bag));
                    }
                    None => {
                        return Err(ConstructionError::UnknownGlyph {
                            line,
                            column: col + 1,
                            glyph: g,
                        });
                    }
                },
            }
        }
    }

    let hero = hero.ok_or(ConstructionError::MissingHero)?;
    Ok((grid, hero))
}

/// Read and parse a map file. A failed read or parse leaves nothing behind.
pub fn parse_map_file(path: &Path, bag: MarkerBag) -> Result<(Grid, Hero), ConstructionError> {
    let text = fs::read_to_string(path).map_err(|source| ConstructionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&text, bag)
}
