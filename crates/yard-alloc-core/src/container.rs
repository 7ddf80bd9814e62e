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

use crate::err::UnknownSlotClassError;
use std::{fmt::Display, str::FromStr};

/// Container length in TEU-equivalent classes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum LengthClass {
    Twenty,
    Forty,
}

impl LengthClass {
    #[inline]
    pub const fn teu(self) -> u8 {
        match self {
            LengthClass::Twenty => 1,
            LengthClass::Forty => 2,
        }
    }
}

impl Display for LengthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthClass::Twenty => write!(f, "TWENTY"),
            LengthClass::Forty => write!(f, "FORTY"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ContainerState {
    Full,
    Empty,
}

impl Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerState::Full => write!(f, "FULL"),
            ContainerState::Empty => write!(f, "EMPTY"),
        }
    }
}

/// What a slot is allowed to hold.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum SlotClass {
    FullOrEmpty,
    EmptyOnly,
}

impl SlotClass {
    #[inline]
    pub const fn accepts(self, state: ContainerState) -> bool {
        match self {
            SlotClass::FullOrEmpty => true,
            SlotClass::EmptyOnly => matches!(state, ContainerState::Empty),
        }
    }
}

impl Display for SlotClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotClass::FullOrEmpty => write!(f, "FULL_OR_EMPTY"),
            SlotClass::EmptyOnly => write!(f, "EMPTY_ONLY"),
        }
    }
}

impl FromStr for SlotClass {
    type Err = UnknownSlotClassError;

    /// Case-insensitive; accepts the legacy spellings found in site configuration files.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "FULL_OR_EMPTY" | "BOTH" | "ANY" | "FULL" => Ok(SlotClass::FullOrEmpty),
            "EMPTY_ONLY" | "EMPTY" => Ok(SlotClass::EmptyOnly),
            _ => Err(UnknownSlotClassError::new(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_only_refuses_full() {
        assert!(!SlotClass::EmptyOnly.accepts(ContainerState::Full));
        assert!(SlotClass::EmptyOnly.accepts(ContainerState::Empty));
        assert!(SlotClass::FullOrEmpty.accepts(ContainerState::Full));
        assert!(SlotClass::FullOrEmpty.accepts(ContainerState::Empty));
    }

    #[test]
    fn test_slot_class_parses_legacy_spellings() {
        assert_eq!("full_or_empty".parse(), Ok(SlotClass::FullOrEmpty));
        assert_eq!("Both".parse(), Ok(SlotClass::FullOrEmpty));
        assert_eq!(" empty-only ".parse(), Ok(SlotClass::EmptyOnly));
        assert_eq!("EMPTY".parse(), Ok(SlotClass::EmptyOnly));
    }

    #[test]
    fn test_slot_class_rejects_unknown_values() {
        let err = "reefer".parse::<SlotClass>().unwrap_err();
        assert_eq!(err.value(), "reefer");
    }
}
