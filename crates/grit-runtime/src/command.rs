//! Per-player command bitmask

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Directions and buttons a player intends this frame.
///
/// Opposite directions never come from the same digital device at once;
/// buttons combine freely.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cmd(u32);

impl Cmd {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const UP: Self = Self(1 << 2);
    pub const DOWN: Self = Self(1 << 3);
    pub const BUTTON1: Self = Self(1 << 4);
    pub const BUTTON2: Self = Self(1 << 5);
    pub const BUTTON3: Self = Self(1 << 6);
    pub const BUTTON4: Self = Self(1 << 7);
    /// Menu escape shares the fourth button
    pub const ESC: Self = Self::BUTTON4;

    pub const DIRECTIONS: Self = Self(0b1111);
    pub const BUTTONS: Self = Self(0b1111_0000);

    const NAMES: [(Cmd, &'static str); 8] = [
        (Cmd::LEFT, "LEFT"),
        (Cmd::RIGHT, "RIGHT"),
        (Cmd::UP, "UP"),
        (Cmd::DOWN, "DOWN"),
        (Cmd::BUTTON1, "BUTTON1"),
        (Cmd::BUTTON2, "BUTTON2"),
        (Cmd::BUTTON3, "BUTTON3"),
        (Cmd::BUTTON4, "BUTTON4"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0xFF)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any bit of `other` is set
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for Cmd {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Cmd {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Cmd {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Cmd {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Cmd {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0 & 0xFF)
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cmd({self})")
    }
}
