//! Stereo placement of a sound relative to the listener's ears
//!
//! Each stereo side has two ears so two split-screen players can share one
//! side. A sound is heard from the point on the line between the nearest
//! left and nearest right ear; walls on the way muffle it.

use crate::mixer::{ChannelEffect, Placement};
use grit_core::{
    chebyshev_distance, closest_point_on_segment, distance_and_bearing, has_clear_line,
    LineOfSight, Vec2i,
};

/// Extra distance charged to sounds behind a wall
pub const MUFFLED_DISTANCE_PENALTY: i32 = 200;

/// Furthest placement distance that is still played
pub const MAX_AUDIBLE_DISTANCE: i32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Listener positions, two per stereo side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ears {
    pub left: [Vec2i; 2],
    pub right: [Vec2i; 2],
}

impl Ears {
    /// All four ears at one position
    pub fn at(pos: Vec2i) -> Self {
        Self {
            left: [pos; 2],
            right: [pos; 2],
        }
    }

    /// Set one ear; any index other than 0 sets the second ear
    pub fn set(&mut self, side: Side, index: usize, pos: Vec2i) {
        let ears = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        ears[index.min(1)] = pos;
    }

    pub fn set_side(&mut self, side: Side, pos: Vec2i) {
        self.set(side, 0, pos);
        self.set(side, 1, pos);
    }

    /// The ear of `side` nearest to `pos`. Ties go to the second ear.
    pub fn nearest(&self, side: Side, pos: Vec2i) -> Vec2i {
        let [first, second] = match side {
            Side::Left => self.left,
            Side::Right => self.right,
        };
        if chebyshev_distance(pos, first) < chebyshev_distance(pos, second) {
            first
        } else {
            second
        }
    }
}

/// Where a sound is heard from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundLocation {
    /// Point between the nearest ears that the sound is measured from
    pub origin: Vec2i,
    pub distance: i32,
    /// Degrees clockwise from up, 0..360
    pub bearing: i32,
    pub muffled: bool,
}

/// Locate a sound at `pos` relative to `ears`
pub fn locate(ears: &Ears, pos: Vec2i, map: &impl LineOfSight) -> SoundLocation {
    let left = ears.nearest(Side::Left, pos);
    let right = ears.nearest(Side::Right, pos);
    let origin = closest_point_on_segment(left, right, pos);
    let (distance, bearing) = distance_and_bearing(origin, pos);
    let muffled = !has_clear_line(pos, origin, map);
    SoundLocation {
        origin,
        distance,
        bearing,
        muffled,
    }
}

/// Placement for a sound `distance` away, or `None` if it is too far to hear.
///
/// Muffled sounds are charged [`MUFFLED_DISTANCE_PENALTY`]; the total is then
/// halved onto the 0..=255 placement scale.
pub fn placement(distance: i32, bearing: i32, muffled: bool) -> Option<Placement> {
    let mut distance = distance;
    if muffled {
        distance = distance.saturating_add(MUFFLED_DISTANCE_PENALTY);
    }
    distance /= 2;
    if distance > MAX_AUDIBLE_DISTANCE {
        return None;
    }
    Some(Placement {
        bearing: bearing.rem_euclid(360) as i16,
        distance: distance.max(0) as u8,
        effect: muffled.then_some(ChannelEffect::Muffle),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grit_core::{OpenMap, TileGrid};

    #[test]
    fn test_placement_saturates_muffle_penalty() {
        assert_eq!(placement(i32::MAX, 0, true), None);
        assert_eq!(placement(i32::MAX - 100, 90, false), None);
    }

    #[test]
    fn test_due_right_of_origin() {
        let loc = locate(&Ears::default(), Vec2i::new(100, 0), &OpenMap);
        assert_eq!(loc.origin, Vec2i::ZERO);
        assert_eq!(loc.distance, 100);
        assert_eq!(loc.bearing, 90);
        assert!(!loc.muffled);

        let placement = placement(loc.distance, loc.bearing, loc.muffled).unwrap();
        assert_eq!(placement.distance, 50);
        assert_eq!(placement.bearing, 90);
        assert_eq!(placement.effect, None);
    }

    #[test]
    fn test_nearest_ear_ties_pick_second() {
        let mut ears = Ears::default();
        ears.set(Side::Left, 0, Vec2i::new(-10, 0));
        ears.set(Side::Left, 1, Vec2i::new(10, 0));
        assert_eq!(ears.nearest(Side::Left, Vec2i::new(0, 50)), Vec2i::new(10, 0));
        assert_eq!(ears.nearest(Side::Left, Vec2i::new(-20, 0)), Vec2i::new(-10, 0));
    }

    #[test]
    fn test_origin_between_split_screen_ears() {
        let mut ears = Ears::default();
        ears.set_side(Side::Left, Vec2i::new(0, 0));
        ears.set_side(Side::Right, Vec2i::new(200, 0));
        let loc = locate(&ears, Vec2i::new(120, -80), &OpenMap);
        assert_eq!(loc.origin, Vec2i::new(120, 0));
        assert_eq!(loc.distance, 80);
        assert_eq!(loc.bearing, 0);
    }

    #[test]
    fn test_wall_muffles() {
        let mut grid = TileGrid::new(Vec2i::new(16, 16));
        grid.block(Vec2i::new(3, 0));
        let loc = locate(&Ears::default(), Vec2i::new(100, 0), &grid);
        assert!(loc.muffled);

        let placement = placement(loc.distance, loc.bearing, loc.muffled).unwrap();
        assert_eq!(placement.distance, 150);
        assert_eq!(placement.effect, Some(ChannelEffect::Muffle));
    }

    #[test]
    fn test_too_far_is_inaudible() {
        assert!(placement(510, 0, false).is_some());
        assert!(placement(512, 0, false).is_none());
        assert!(placement(320, 0, true).is_none());
        assert!(placement(310, 0, true).is_some());
    }
}
