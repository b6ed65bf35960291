//! Line-of-sight queries against a tile map
//!
//! The map itself lives outside the engine core; it is consulted only through
//! [`LineOfSight`], one world position at a time.

use crate::types::Vec2i;
use std::collections::HashSet;

/// Answers whether the tile under a world position blocks sight
pub trait LineOfSight {
    fn blocks_sight(&self, pos: Vec2i) -> bool;
}

impl<T: LineOfSight + ?Sized> LineOfSight for &T {
    fn blocks_sight(&self, pos: Vec2i) -> bool {
        (**self).blocks_sight(pos)
    }
}

/// A map with nothing in the way
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenMap;

impl LineOfSight for OpenMap {
    fn blocks_sight(&self, _pos: Vec2i) -> bool {
        false
    }
}

/// A sparse grid of sight-blocking tiles
#[derive(Clone, Debug)]
pub struct TileGrid {
    tile_size: Vec2i,
    blocking: HashSet<Vec2i>,
}

impl TileGrid {
    pub fn new(tile_size: Vec2i) -> Self {
        Self {
            tile_size,
            blocking: HashSet::new(),
        }
    }

    /// Mark a tile (in tile coordinates) as blocking sight
    pub fn block(&mut self, tile: Vec2i) {
        self.blocking.insert(tile);
    }

    pub fn unblock(&mut self, tile: Vec2i) {
        self.blocking.remove(&tile);
    }

    pub fn tile_size(&self) -> Vec2i {
        self.tile_size
    }
}

impl LineOfSight for TileGrid {
    fn blocks_sight(&self, pos: Vec2i) -> bool {
        self.blocking.contains(&pos.to_tile(self.tile_size))
    }
}

/// Walk a Xiaolin Wu line from `from` to `to`, returning false as soon as a
/// covered pixel lies on a sight-blocking tile.
///
/// Both pixels straddling the ideal line are tested wherever the line does
/// not pass exactly through a pixel centre. Endpoints are included.
pub fn has_clear_line(from: Vec2i, to: Vec2i, map: &impl LineOfSight) -> bool {
    let steep = to.y.abs_diff(from.y) > to.x.abs_diff(from.x);
    let (mut a, mut b) = if steep {
        (Vec2i::new(from.y, from.x), Vec2i::new(to.y, to.x))
    } else {
        (from, to)
    };
    if a.x > b.x {
        std::mem::swap(&mut a, &mut b);
    }

    let dx = b.x as f64 - a.x as f64;
    let gradient = if dx == 0.0 { 1.0 } else { (b.y as f64 - a.y as f64) / dx };

    let blocked = |major: i32, minor: i32| {
        let pos = if steep {
            Vec2i::new(minor, major)
        } else {
            Vec2i::new(major, minor)
        };
        map.blocks_sight(pos)
    };

    for x in a.x..=b.x {
        let intery = a.y as f64 + gradient * (x as f64 - a.x as f64);
        let y = intery.floor();
        if blocked(x, y as i32) {
            return false;
        }
        if intery - y > 1e-9 && blocked(x, y as i32 + 1) {
            return false;
        }
    }
    true
}
