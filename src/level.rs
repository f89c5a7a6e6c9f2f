// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flags::LevelFlags;

/// Number of characters in the string representation of a level.
pub const LEVEL_STR_LEN: usize = 9;

/// Bit offset of the owner field.
pub const OWNER_SHIFT: u16 = 6;

/// Bit offset of the group field.
pub const GROUP_SHIFT: u16 = 3;

/// Bit offset of the other field.
pub const OTHER_SHIFT: u16 = 0;

/// Placeholder symbol for "no access" in the string representation.
pub const NO_ACCESS_SYMBOL: char = '-';

const MASK: u16 = 0o777;

const FIELD_MASK: u16 = 0o7;

/// Permission level, modelled after Unix file-mode bits.
///
/// Nine bits are laid out as three fields, most significant first: owner (bits 8-6), group
/// (bits 5-3) and other (bits 2-0). Every field is `read (4) | write (2) | execute (1)`.
///
/// ```text
/// owner   group   other
/// r w x   r w x   r w x
/// 8 7 6   5 4 3   2 1 0
/// ```
///
/// Levels are values, operations always return a new level. Bits outside of the nine
/// meaningful positions are never produced by any constructor.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "LevelFlags", into = "LevelFlags")]
pub struct Level(u16);

impl Level {
    /// No access.
    pub const NONE: Level = Level(0);

    /// Read action within a single field.
    pub const READ: Level = Level(0o4);

    /// Write action within a single field.
    pub const WRITE: Level = Level(0o2);

    /// Execute action within a single field.
    pub const EXECUTE: Level = Level(0o1);

    /// Every action for owner, group and other.
    pub const ALL: Level = Level(MASK);

    pub const OWNER_READ: Level = Level(0o400);
    pub const OWNER_WRITE: Level = Level(0o200);
    pub const OWNER_EXECUTE: Level = Level(0o100);
    pub const GROUP_READ: Level = Level(0o040);
    pub const GROUP_WRITE: Level = Level(0o020);
    pub const GROUP_EXECUTE: Level = Level(0o010);
    pub const OTHER_READ: Level = Level(0o004);
    pub const OTHER_WRITE: Level = Level(0o002);
    pub const OTHER_EXECUTE: Level = Level(0o001);

    /// Create a level from raw bits, discarding everything above the nine meaningful ones.
    pub const fn new(bits: u16) -> Self {
        Self(bits & MASK)
    }

    /// Raw bits of this level.
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Convert an action symbol into its level: `r` = 4, `w` = 2, `x` = 1.
    ///
    /// Any other symbol maps to no access.
    pub const fn from_action(symbol: char) -> Self {
        match symbol {
            'r' => Self::READ,
            'w' => Self::WRITE,
            'x' => Self::EXECUTE,
            _ => Self::NONE,
        }
    }

    /// Convert a single action level back into its symbol.
    ///
    /// Only the three single-bit values have a symbol, everything else (including no access and
    /// combined actions) is the `-` placeholder.
    pub const fn to_action(&self) -> char {
        match self.0 {
            0o4 => 'r',
            0o2 => 'w',
            0o1 => 'x',
            _ => NO_ACCESS_SYMBOL,
        }
    }

    /// Owner field, moved into the lowest three bits.
    pub const fn owner(&self) -> Self {
        self.field(OWNER_SHIFT)
    }

    /// Group field, moved into the lowest three bits.
    pub const fn group(&self) -> Self {
        self.field(GROUP_SHIFT)
    }

    /// Other field.
    pub const fn other(&self) -> Self {
        self.field(OTHER_SHIFT)
    }

    /// Move the lowest field of this level into the owner position.
    pub(crate) const fn as_owner(&self) -> Self {
        Self::new((self.0 & FIELD_MASK) << OWNER_SHIFT)
    }

    /// Move the lowest field of this level into the group position.
    pub(crate) const fn as_group(&self) -> Self {
        Self::new((self.0 & FIELD_MASK) << GROUP_SHIFT)
    }

    /// Returns true if every bit of `other` is also set in this level.
    pub const fn contains(&self, other: Level) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no bit is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    const fn field(&self, shift: u16) -> Self {
        Self((self.0 >> shift) & FIELD_MASK)
    }

    fn field_symbols(field: Level) -> [char; 3] {
        [
            (field & Self::READ).to_action(),
            (field & Self::WRITE).to_action(),
            (field & Self::EXECUTE).to_action(),
        ]
    }
}

impl BitOr for Level {
    type Output = Level;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Level {
    type Output = Level;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl FromStr for Level {
    type Err = LevelError;

    /// Parse a nine character string of action symbols, for example `rwxr-x---`.
    ///
    /// Dashes are placeholders for a missing action. Every triple is read as owner, group and
    /// other in that order.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = value.chars().collect();
        let symbols: [char; LEVEL_STR_LEN] = symbols
            .try_into()
            .map_err(|symbols: Vec<char>| {
                LevelError::InvalidLength(symbols.len(), LEVEL_STR_LEN)
            })?;

        let mut bits = 0;
        for (position, symbol) in symbols.into_iter().enumerate() {
            if !matches!(symbol, 'r' | 'w' | 'x' | NO_ACCESS_SYMBOL) {
                return Err(LevelError::InvalidSymbol(symbol, position));
            }

            let shift = match position / 3 {
                0 => OWNER_SHIFT,
                1 => GROUP_SHIFT,
                _ => OTHER_SHIFT,
            };

            bits |= Level::from_action(symbol).bits() << shift;
        }

        Ok(Self::new(bits))
    }
}

impl TryFrom<&str> for Level {
    type Error = LevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for u16 {
    fn from(value: Level) -> Self {
        value.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in [self.owner(), self.group(), self.other()] {
            for symbol in Self::field_symbols(field) {
                write!(f, "{symbol}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({:#05o} {})", self.0, self)
    }
}

/// Error types for `Level`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Level string does not have exactly nine characters.
    #[error("invalid level string length {0} characters, expected {1} characters")]
    InvalidLength(usize, usize),

    /// Level string contains a symbol other than `r`, `w`, `x` or `-`.
    #[error("invalid symbol '{0}' at position {1} in level string")]
    InvalidSymbol(char, usize),

    /// Level expression contains a symbol which is not part of the grammar.
    #[error("invalid symbol '{0}' in level expression")]
    InvalidExpressionSymbol(char),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Level, LevelError};

    #[rstest]
    #[case(0o777, "rwxrwxrwx")]
    #[case(0o770, "rwxrwx---")]
    #[case(0o700, "rwx------")]
    #[case(0o111, "--x--x--x")]
    #[case(0o222, "-w--w--w-")]
    #[case(0o444, "r--r--r--")]
    #[case(0o750, "rwxr-x---")]
    #[case(0o000, "---------")]
    fn level_to_string(#[case] bits: u16, #[case] expected: &str) {
        let level = Level::new(bits);
        assert_eq!(level.to_string(), expected);
        assert_eq!(expected.parse::<Level>().unwrap(), level);
    }

    #[test]
    fn string_round_trip() {
        for bits in 0..=0o777 {
            let level = Level::new(bits);
            let parsed: Level = level.to_string().parse().unwrap();
            assert_eq!(parsed, level, "round trip failed for {:o}", bits);
        }
    }

    #[rstest]
    #[case("")]
    #[case("r")]
    #[case("rwxrwxrw")]
    #[case("rwxrwxrwxr")]
    fn rejects_invalid_length(#[case] value: &str) {
        let len = value.chars().count();
        assert_eq!(
            value.parse::<Level>(),
            Err(LevelError::InvalidLength(len, 9))
        );
    }

    #[test]
    fn rejects_invalid_symbols() {
        assert_eq!(
            "rwxrwxrwa".parse::<Level>(),
            Err(LevelError::InvalidSymbol('a', 8))
        );
        assert_eq!(
            "rwx rwxrw".parse::<Level>(),
            Err(LevelError::InvalidSymbol(' ', 3))
        );

        // Multi-byte characters are counted as characters, not bytes.
        assert_eq!(
            "rwxrwxrwä".parse::<Level>(),
            Err(LevelError::InvalidSymbol('ä', 8))
        );
    }

    #[test]
    fn symbols_are_or_ed_into_their_triple() {
        // Position within a triple does not matter, only the triple does.
        let level: Level = "xwr---r--".parse().unwrap();
        assert_eq!(level, Level::new(0o704));
    }

    #[test]
    fn action_symbols() {
        assert_eq!(Level::from_action('r'), Level::READ);
        assert_eq!(Level::from_action('w'), Level::WRITE);
        assert_eq!(Level::from_action('x'), Level::EXECUTE);
        assert_eq!(Level::from_action('q'), Level::NONE);
        assert_eq!(Level::from_action('-'), Level::NONE);

        assert_eq!(Level::READ.to_action(), 'r');
        assert_eq!(Level::WRITE.to_action(), 'w');
        assert_eq!(Level::EXECUTE.to_action(), 'x');
        assert_eq!(Level::NONE.to_action(), '-');
        assert_eq!(Level::new(0o6).to_action(), '-');
        assert_eq!(Level::new(0o7).to_action(), '-');
    }

    #[test]
    fn constructor_discards_extra_bits() {
        assert_eq!(Level::new(0o1777), Level::ALL);
        assert_eq!(Level::new(u16::MAX).bits(), 0o777);
    }

    #[test]
    fn fields() {
        let level = Level::new(0o751);
        assert_eq!(level.owner(), Level::new(0o7));
        assert_eq!(level.group(), Level::new(0o5));
        assert_eq!(level.other(), Level::new(0o1));

        assert_eq!(Level::READ.as_owner(), Level::OWNER_READ);
        assert_eq!(Level::WRITE.as_group(), Level::GROUP_WRITE);

        assert!(level.contains(Level::OWNER_READ | Level::GROUP_EXECUTE));
        assert!(!level.contains(Level::GROUP_WRITE));
        assert!(Level::NONE.is_empty());
    }
}
