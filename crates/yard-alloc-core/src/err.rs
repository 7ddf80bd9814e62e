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

use crate::coord::{Bay, SlotCoord};
use std::fmt::Display;

/// Reason a piece of coordinate text or a raw component was refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoordinateParseError {
    Malformed(String),
    RowOutOfRange(char),
    BayOutOfRange(u8),
    TierOutOfRange(u8),
}

impl Display for CoordinateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CoordinateParseError::*;
        match self {
            Malformed(text) => write!(
                f,
                "Malformed slot coordinate {:?}: expected the form A01-1",
                text
            ),
            RowOutOfRange(c) => write!(f, "Row {:?} is outside the yard rows A-E", c),
            BayOutOfRange(b) => write!(f, "Bay {} is outside the yard bays 1-20", b),
            TierOutOfRange(t) => write!(f, "Tier {} is outside the yard tiers 1-5", t),
        }
    }
}

impl std::error::Error for CoordinateParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanOutOfRangeError {
    logical: SlotCoord,
}

impl SpanOutOfRangeError {
    #[inline]
    pub fn new(logical: SlotCoord) -> Self {
        Self { logical }
    }

    #[inline]
    pub fn logical(&self) -> SlotCoord {
        self.logical
    }

    #[inline]
    pub fn bay(&self) -> Bay {
        self.logical.bay()
    }
}

impl Display for SpanOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A 40ft container at {} would extend past bay {}",
            self.logical,
            Bay::MAX
        )
    }
}

impl std::error::Error for SpanOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OddLogicalBayError {
    logical: SlotCoord,
}

impl OddLogicalBayError {
    #[inline]
    pub fn new(logical: SlotCoord) -> Self {
        Self { logical }
    }

    #[inline]
    pub fn logical(&self) -> SlotCoord {
        self.logical
    }
}

impl Display for OddLogicalBayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A 40ft container must be addressed by an even bay, got {}",
            self.logical
        )
    }
}

impl std::error::Error for OddLogicalBayError {}

/// Why a coordinate cannot anchor a 40ft container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FortySpanError {
    OutOfRange(SpanOutOfRangeError),
    OddBay(OddLogicalBayError),
}

impl Display for FortySpanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FortySpanError::OutOfRange(e) => write!(f, "{e}"),
            FortySpanError::OddBay(e) => write!(f, "{e}"),
        }
    }
}

impl From<SpanOutOfRangeError> for FortySpanError {
    fn from(err: SpanOutOfRangeError) -> Self {
        Self::OutOfRange(err)
    }
}

impl From<OddLogicalBayError> for FortySpanError {
    fn from(err: OddLogicalBayError) -> Self {
        Self::OddBay(err)
    }
}

impl std::error::Error for FortySpanError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownSlotClassError {
    value: String,
}

impl UnknownSlotClassError {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for UnknownSlotClassError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unrecognized slot classification {:?}", self.value)
    }
}

impl std::error::Error for UnknownSlotClassError {}
