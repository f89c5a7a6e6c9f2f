// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for authorization checks.
//!
//! `Config` is read-only and usually deserialized once at start-up, then handed to every
//! `User` which is created with `User::with_config`.
use serde::{Deserialize, Serialize};

use crate::group::Group;

/// Default name of the administrative group.
pub const DEFAULT_ADMIN_GROUP: &str = "admin";

/// Configuration parameters for authorization checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Members of this group are allowed every action under every grant.
    pub admin_group: Group,
}

impl Config {
    pub fn new(admin_group: impl Into<Group>) -> Self {
        Self {
            admin_group: admin_group.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_group: Group::new(DEFAULT_ADMIN_GROUP),
        }
    }
}
