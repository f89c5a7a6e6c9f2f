// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access control with Unix-style permission levels.
//!
//! A [`Level`] packs read, write and execute actions for an owner, a group and everyone else into
//! nine bits. A [`Grant`] binds such a level to an optional owner and group, a [`GrantList`]
//! permits an action if any of its grants does. Authorization checks are done from the
//! perspective of a [`User`]:
//!
//! ```
//! use p2panda_acl::{Grant, User};
//!
//! let grant = Grant::from_parts("alice", "editors", "rwxrw-r--")?;
//!
//! let alice = User::new("alice", ["staff"]);
//! let bob = User::new("bob", ["editors"]);
//! let eve = User::new("eve", Vec::<&str>::new());
//!
//! assert!(alice.can('x', &grant));
//! assert!(bob.can('w', &grant));
//! assert!(eve.can('r', &grant));
//! assert!(!eve.can('w', &grant));
//! # Ok::<(), p2panda_acl::LevelError>(())
//! ```
//!
//! Members of the administrative group (see [`Config`]) are allowed every action.
mod config;
pub mod expression;
mod flags;
mod grant;
mod group;
mod level;
#[cfg(test)]
mod test_utils;
mod user;

pub use config::{Config, DEFAULT_ADMIN_GROUP};
pub use flags::LevelFlags;
pub use grant::{Grant, GrantList, Permits};
pub use group::{Group, Groups};
pub use level::{
    GROUP_SHIFT, LEVEL_STR_LEN, Level, LevelError, NO_ACCESS_SYMBOL, OTHER_SHIFT, OWNER_SHIFT,
};
pub use user::User;
