//! Permission gates for the "create if missing" import options.
//!
//! A gate answers `true` when the user's primary (first) role is listed in
//! the policy. Otherwise the host's default answer is passed through
//! unchanged, so a gate can widen access but never narrow it.

use ivf_model::PermissionPolicy;
use serde::{Deserialize, Serialize};

/// The user running an import, as seen by the permission gates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportUser {
    pub roles: Vec<String>,
}

impl ImportUser {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }
}

fn primary_role_permitted(permitted: &[String], user: &ImportUser) -> bool {
    user.primary_role()
        .is_some_and(|role| permitted.iter().any(|p| p == role))
}

/// May `user` enable creating categories that do not exist yet?
pub fn may_create_categories(
    policy: &PermissionPolicy,
    user: &ImportUser,
    allow_default: bool,
) -> bool {
    primary_role_permitted(&policy.category_creation_roles, user) || allow_default
}

/// May `user` enable creating list options that do not exist yet?
pub fn may_create_options(policy: &PermissionPolicy, user: &ImportUser, allow_default: bool) -> bool {
    primary_role_permitted(&policy.option_creation_roles, user) || allow_default
}
