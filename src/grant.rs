// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::group::Group;
use crate::level::{Level, LevelError};
use crate::user::User;

use private::Sealed;

mod private {
    use crate::level::Level;
    use crate::user::User;

    pub trait Sealed {
        /// Returns true if the user may exercise the requested action level.
        fn permits(&self, user: &User, level: Level) -> bool;
    }
}

/// Rule deciding if a user may exercise an action.
///
/// Implemented by a single [`Grant`] and by a [`GrantList`], the trait can not be implemented
/// outside of this crate. Use `User::can` to evaluate it.
pub trait Permits: Sealed {}

/// Evaluate a grant for the requested action level.
pub(crate) fn permits<G>(grant: &G, user: &User, level: Level) -> bool
where
    G: Permits + ?Sized,
{
    grant.permits(user, level)
}

/// Grants a permission level to an owner, a group and everyone else.
///
/// Owner and group are both optional. The level contains separate actions for each of these
/// subjects, following the Unix file-mode model. The "other" actions are granted to every user,
/// a user who is the owner or in the group is also checked against them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<Group>,
    level: Level,
}

impl Grant {
    /// Grant with the given level and neither owner nor group.
    pub fn new(level: Level) -> Self {
        Self {
            owner: None,
            group: None,
            level,
        }
    }

    /// Create a grant from an owner id, group name and level string like `rwxr-x---`.
    ///
    /// Empty owner or group names mean that the slot does not apply.
    pub fn from_parts(owner: &str, group: &str, level: &str) -> Result<Self, LevelError> {
        Ok(Self::new(level.parse()?).with_owner(owner).with_group(group))
    }

    /// Set the owner of this grant.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        self.owner = (!owner.is_empty()).then_some(owner);
        self
    }

    /// Set the group of this grant.
    pub fn with_group(mut self, group: impl Into<Group>) -> Self {
        let group = group.into();
        self.group = (!group.is_empty()).then_some(group);
        self
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    fn is_owner(&self, user: &User) -> bool {
        self.owner
            .as_deref()
            .is_some_and(|owner| !owner.is_empty() && owner == user.id())
    }

    fn is_group_member(&self, user: &User) -> bool {
        self.group
            .as_ref()
            .is_some_and(|group| !group.is_empty() && user.groups().contains(group))
    }
}

impl Sealed for Grant {
    fn permits(&self, user: &User, level: Level) -> bool {
        let mut requested = level.other();

        if self.is_owner(user) {
            requested = requested | level.as_owner();
        }

        if self.is_group_member(user) {
            requested = requested | level.as_group();
        }

        !(requested & self.level).is_empty()
    }
}

impl Permits for Grant {}

/// List of grants, permits an action if any of its grants does.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantList(Vec<Grant>);

impl GrantList {
    pub fn new(grants: Vec<Grant>) -> Self {
        Self(grants)
    }

    /// Append a grant to the list.
    pub fn with_grant(mut self, grant: Grant) -> Self {
        self.0.push(grant);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grant> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Sealed for GrantList {
    fn permits(&self, user: &User, level: Level) -> bool {
        self.0.iter().any(|grant| grant.permits(user, level))
    }
}

impl Permits for GrantList {}

impl FromIterator<Grant> for GrantList {
    fn from_iter<T: IntoIterator<Item = Grant>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Grant>> for GrantList {
    fn from(value: Vec<Grant>) -> Self {
        Self(value)
    }
}
