//! Fixed-size tile map the rays are marched against.

use glam::IVec2;

/// One map cell.  The discriminants are the on-disk tile codes.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Open = 0,
    /// Opaque brick wall.  Also what every out-of-bounds lookup returns.
    Wall = 1,
    /// Second wall material (mossy); climbable as far as physics cares.
    Moss = 2,
    /// Launch pad – walkable, drawn with an accent colour.
    Pad = 3,
    /// Hole in the floor – drawn as a deep parallax pit.
    Void = 4,
}

impl Tile {
    /// Decode a map-file code.  Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Open),
            1 => Some(Tile::Wall),
            2 => Some(Tile::Moss),
            3 => Some(Tile::Pad),
            4 => Some(Tile::Void),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for tiles that stop a ray.
    #[inline(always)]
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Wall | Tile::Moss)
    }
}

/// Row-major tile grid.  Dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// All-open grid of `width × height` cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Open; width * height],
        }
    }

    /// Open grid surrounded by a one-cell wall border.
    pub fn bordered(width: usize, height: usize) -> Self {
        let mut grid = Self::new(width, height);
        for x in 0..width as i32 {
            grid.set(x, 0, Tile::Wall);
            grid.set(x, height as i32 - 1, Tile::Wall);
        }
        for y in 0..height as i32 {
            grid.set(0, y, Tile::Wall);
            grid.set(width as i32 - 1, y, Tile::Wall);
        }
        grid
    }

    pub(crate) fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            width,
            height,
            tiles,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    /// Tile at `(x, y)`.  Anything outside the map is a wall, which is what
    /// guarantees every ray terminates.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Wall, |i| self.tiles[i])
    }

    #[inline]
    pub fn get_cell(&self, cell: IVec2) -> Tile {
        self.get(cell.x, cell.y)
    }

    /// Overwrite one cell.  Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.width.max(1))
    }
}
