// ──────────────────────────────────────────────────────────────────────────
// world/level.rs
//
//  *   text map   ( "1 1 1\n1 0 1\n1 1 1" )   ──>  world::grid::Grid
//  *   built-in demo level when no map file is given
// ──────────────────────────────────────────────────────────────────────────

use std::{path::Path, str::FromStr};

use thiserror::Error;

use crate::world::grid::{Grid, Tile};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LevelError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("map contains no rows")]
    Empty,

    #[error("row {line} has {found} tiles, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("bad tile `{token}` at row {line}, column {column}")]
    BadTile {
        line: usize,
        column: usize,
        token: String,
    },
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Read a whitespace-separated tile map from disk.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid, LevelError> {
    std::fs::read_to_string(path)?.parse()
}

impl FromStr for Grid {
    type Err = LevelError;

    /// One row per non-blank line, tile codes `0‥4`, every row the same
    /// length.  Line numbers in errors are 1-based source lines.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut width = None;
        let mut tiles = Vec::new();
        let mut rows = 0;

        for (line_idx, line) in src.lines().enumerate() {
            let line_no = line_idx + 1;
            let row_start = tiles.len();

            for (column, token) in line.split_whitespace().enumerate() {
                let tile = token
                    .parse::<u8>()
                    .ok()
                    .and_then(Tile::from_code)
                    .ok_or_else(|| LevelError::BadTile {
                        line: line_no,
                        column: column + 1,
                        token: token.to_string(),
                    })?;
                tiles.push(tile);
            }

            let found = tiles.len() - row_start;
            if found == 0 {
                continue; // blank line
            }
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(LevelError::Ragged {
                        line: line_no,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let width = width.ok_or(LevelError::Empty)?;
        Ok(Grid::from_tiles(width, rows, tiles))
    }
}

/// Demo level edge length (square).
pub const DEMO_SIZE: usize = 24;

/// The default 24×24 level: archery room, a wall-run corridor, a pillar
/// arena, one launch pad and a pit.
pub fn demo_level() -> Grid {
    let mut g = Grid::bordered(DEMO_SIZE, DEMO_SIZE);

    // divider between the first two rooms, open at y = 8‥9
    for y in 0..10 {
        g.set(8, y, Tile::Wall);
    }
    g.set(8, 8, Tile::Open);
    g.set(8, 9, Tile::Open);

    // corridor: brick on one side, the mossy run-wall on the other
    for x in 8..20 {
        g.set(x, 10, Tile::Wall);
        g.set(x, 6, Tile::Moss);
    }

    // arena pillars
    g.set(15, 15, Tile::Wall);
    g.set(18, 18, Tile::Moss);
    g.set(21, 15, Tile::Wall);

    g.set(4, 12, Tile::Pad);
    for y in 18..21 {
        for x in 10..14 {
            g.set(x, y, Tile::Void);
        }
    }
    g
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_square_map() {
        let grid: Grid = "1 1 1\n1 4 1\n1 3 2\n".parse().unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 1), Tile::Void);
        assert_eq!(grid.get(1, 2), Tile::Pad);
        assert_eq!(grid.get(2, 2), Tile::Moss);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let grid: Grid = "\n0 0\n\n   \n0 1\n".parse().unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.get(1, 1), Tile::Wall);
    }

    #[test]
    fn ragged_row_rejected() {
        let err = "0 0 0\n0 0\n".parse::<Grid>().unwrap_err();
        assert!(matches!(
            err,
            LevelError::Ragged {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn unknown_code_rejected() {
        let err = "0 7\n".parse::<Grid>().unwrap_err();
        match err {
            LevelError::BadTile {
                line,
                column,
                token,
            } => {
                assert_eq!((line, column), (1, 2));
                assert_eq!(token, "7");
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(matches!(
            "x 0".parse::<Grid>(),
            Err(LevelError::BadTile { .. })
        ));
    }

    #[test]
    fn empty_map_rejected() {
        assert!(matches!("  \n\n".parse::<Grid>(), Err(LevelError::Empty)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_grid("/definitely/not/here.map").unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }

    #[test]
    fn demo_level_layout() {
        let g = demo_level();
        assert_eq!((g.width(), g.height()), (DEMO_SIZE, DEMO_SIZE));
        assert_eq!(g.get(2, 2), Tile::Open);
        assert_eq!(g.get(8, 3), Tile::Wall);
        assert_eq!(g.get(8, 8), Tile::Open);
        assert_eq!(g.get(12, 6), Tile::Moss);
        assert_eq!(g.get(4, 12), Tile::Pad);
        assert_eq!(g.get(11, 19), Tile::Void);
        assert_eq!(g.get(23, 12), Tile::Wall);
    }
}
