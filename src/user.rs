// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::{debug, trace};

use crate::config::Config;
use crate::grant::{Permits, permits};
use crate::group::{Group, Groups};
use crate::level::Level;

/// An access controlled user with its group memberships.
///
/// Identity and memberships are expected to be resolved (and authenticated) before a user is
/// created, they are taken as they are here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    id: String,
    groups: Groups,
    admin_group: Group,
}

impl User {
    /// Create a user with the default configuration.
    pub fn new<I, G>(id: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<Group>,
    {
        Self::with_config(id, groups, &Config::default())
    }

    /// Create a user whose authorization checks follow the given configuration.
    pub fn with_config<I, G>(id: impl Into<String>, groups: I, config: &Config) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<Group>,
    {
        Self {
            id: id.into(),
            groups: Groups::new(groups),
            admin_group: config.admin_group.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Returns true if the user is a member of the configured administrative group.
    pub fn is_admin(&self) -> bool {
        self.groups.contains(&self.admin_group)
    }

    /// Check if the user may take an action under the given grant.
    ///
    /// Actions are `r` (read), `w` (write) and `x` (execute), any other symbol is never permitted
    /// by a grant. Members of the administrative group are allowed everything.
    pub fn can<G>(&self, action: char, grant: &G) -> bool
    where
        G: Permits + ?Sized,
    {
        let level = Level::from_action(action);

        if self.is_admin() {
            debug!(user = %self.id, %action, "allow action for admin group member");
            return true;
        }

        let allowed = permits(grant, self, level);
        trace!(user = %self.id, %action, allowed, "check action against grant");
        allowed
    }
}
