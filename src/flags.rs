// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// A level stored as nine independent flags.
///
/// This is the shape in which levels are persisted in document stores: every action of every
/// subject is a separate, named boolean. `Level` serializes through this type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelFlags {
    pub owner_read: bool,
    pub owner_write: bool,
    pub owner_execute: bool,
    pub group_read: bool,
    pub group_write: bool,
    pub group_execute: bool,
    pub other_read: bool,
    pub other_write: bool,
    pub other_execute: bool,
}

impl LevelFlags {
    /// Flags paired with the level bit they stand for, owner read first.
    pub fn bits(&self) -> [(bool, Level); 9] {
        [
            (self.owner_read, Level::OWNER_READ),
            (self.owner_write, Level::OWNER_WRITE),
            (self.owner_execute, Level::OWNER_EXECUTE),
            (self.group_read, Level::GROUP_READ),
            (self.group_write, Level::GROUP_WRITE),
            (self.group_execute, Level::GROUP_EXECUTE),
            (self.other_read, Level::OTHER_READ),
            (self.other_write, Level::OTHER_WRITE),
            (self.other_execute, Level::OTHER_EXECUTE),
        ]
    }
}

impl From<Level> for LevelFlags {
    fn from(level: Level) -> Self {
        Self {
            owner_read: level.contains(Level::OWNER_READ),
            owner_write: level.contains(Level::OWNER_WRITE),
            owner_execute: level.contains(Level::OWNER_EXECUTE),
            group_read: level.contains(Level::GROUP_READ),
            group_write: level.contains(Level::GROUP_WRITE),
            group_execute: level.contains(Level::GROUP_EXECUTE),
            other_read: level.contains(Level::OTHER_READ),
            other_write: level.contains(Level::OTHER_WRITE),
            other_execute: level.contains(Level::OTHER_EXECUTE),
        }
    }
}

impl From<LevelFlags> for Level {
    fn from(flags: LevelFlags) -> Self {
        flags
            .bits()
            .into_iter()
            .filter(|(is_set, _)| *is_set)
            .fold(Level::NONE, |level, (_, bit)| level | bit)
    }
}
