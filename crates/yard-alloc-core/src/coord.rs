// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Slot Coordinates
//!
//! A yard is a fixed grid of rows `A`-`E`, bays `1`-`20` and tiers `1`-`5`.
//! Each component is a validated newtype, so a [`SlotCoord`] that exists is
//! always inside the grid. The canonical text form is `{row}{bay:02}-{tier}`,
//! e.g. `A02-1`.

use crate::err::CoordinateParseError;
use std::{fmt::Display, str::FromStr};

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Row(u8);

impl Row {
    /// Number of rows in a yard.
    pub const COUNT: u8 = 5;

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Row(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn from_letter(letter: char) -> Result<Self, CoordinateParseError> {
        match letter {
            'A'..='E' => Ok(Row(letter as u8 - b'A')),
            _ => Err(CoordinateParseError::RowOutOfRange(letter)),
        }
    }

    /// Zero based position of the row, `A` is `0`.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    #[inline]
    pub fn all() -> impl DoubleEndedIterator<Item = Row> + ExactSizeIterator {
        (0..Self::COUNT).map(Row)
    }
}

impl Display for Row {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Bay(u8);

impl Bay {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    #[inline]
    pub fn new(value: u8) -> Result<Self, CoordinateParseError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Bay(value))
        } else {
            Err(CoordinateParseError::BayOutOfRange(value))
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    /// Returns the bay `delta` positions away, or `None` when that leaves the row.
    #[inline]
    pub fn offset(self, delta: i8) -> Option<Self> {
        let moved = i16::from(self.0) + i16::from(delta);
        if (i16::from(Self::MIN)..=i16::from(Self::MAX)).contains(&moved) {
            Some(Bay(moved as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn all() -> impl DoubleEndedIterator<Item = Bay> + ExactSizeIterator {
        (Self::MIN..=Self::MAX).map(Bay)
    }
}

impl Display for Bay {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Tier(u8);

impl Tier {
    pub const MAX: u8 = 5;

    /// Ground level.
    pub const GROUND: Tier = Tier(1);
    pub const TOP: Tier = Tier(Self::MAX);

    #[inline]
    pub fn new(value: u8) -> Result<Self, CoordinateParseError> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Tier(value))
        } else {
            Err(CoordinateParseError::TierOutOfRange(value))
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_ground(self) -> bool {
        self.0 == 1
    }

    #[inline]
    pub const fn below(self) -> Option<Self> {
        if self.0 > 1 { Some(Tier(self.0 - 1)) } else { None }
    }

    #[inline]
    pub const fn above(self) -> Option<Self> {
        if self.0 < Self::MAX {
            Some(Tier(self.0 + 1))
        } else {
            None
        }
    }

    #[inline]
    pub fn all() -> impl DoubleEndedIterator<Item = Tier> + ExactSizeIterator {
        (1..=Self::MAX).map(Tier)
    }
}

impl Display for Tier {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit cell of the yard grid.
///
/// Ordering is row-major: row, then bay, then tier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SlotCoord {
    row: Row,
    bay: Bay,
    tier: Tier,
}

impl SlotCoord {
    #[inline]
    pub const fn new(row: Row, bay: Bay, tier: Tier) -> Self {
        Self { row, bay, tier }
    }

    /// Parses the canonical text form, e.g. `A02-1`.
    #[inline]
    pub fn parse(text: &str) -> Result<Self, CoordinateParseError> {
        text.parse()
    }

    #[inline]
    pub const fn row(&self) -> Row {
        self.row
    }

    #[inline]
    pub const fn bay(&self) -> Bay {
        self.bay
    }

    #[inline]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    #[inline]
    pub const fn with_bay(self, bay: Bay) -> Self {
        Self { bay, ..self }
    }

    #[inline]
    pub const fn with_tier(self, tier: Tier) -> Self {
        Self { tier, ..self }
    }

    #[inline]
    pub fn below(self) -> Option<Self> {
        self.tier.below().map(|tier| self.with_tier(tier))
    }

    #[inline]
    pub fn above(self) -> Option<Self> {
        self.tier.above().map(|tier| self.with_tier(tier))
    }

    /// Every coordinate of the grid in row, bay, tier order.
    pub fn all() -> impl Iterator<Item = SlotCoord> {
        Row::all().flat_map(|row| {
            Bay::all().flat_map(move |bay| Tier::all().map(move |tier| SlotCoord::new(row, bay, tier)))
        })
    }
}

impl Display for SlotCoord {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}-{}", self.row, self.bay, self.tier)
    }
}

impl FromStr for SlotCoord {
    type Err = CoordinateParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes = text.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[0].is_ascii_uppercase()
            && bytes[1].is_ascii_digit()
            && bytes[2].is_ascii_digit()
            && bytes[3] == b'-'
            && bytes[4].is_ascii_digit();
        if !well_formed {
            return Err(CoordinateParseError::Malformed(text.to_string()));
        }

        let row = Row::from_letter(bytes[0] as char)?;
        let bay = Bay::new((bytes[1] - b'0') * 10 + (bytes[2] - b'0'))?;
        let tier = Tier::new(bytes[4] - b'0')?;
        Ok(SlotCoord::new(row, bay, tier))
    }
}

impl From<(Row, Bay, Tier)> for SlotCoord {
    #[inline]
    fn from((row, bay, tier): (Row, Bay, Tier)) -> Self {
        SlotCoord::new(row, bay, tier)
    }
}
