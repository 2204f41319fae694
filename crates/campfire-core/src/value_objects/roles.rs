//! Role flags derived from a user's `is_admin` / `is_judge` columns
//!
//! Admins pass every role check, mirroring the way the dashboard lets an
//! admin do anything a judge can.

use bitflags::bitflags;
use serde::{Serialize, Serializer};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Roles: u8 {
        /// Can score teams
        const JUDGE = 1 << 0;
        /// Full access: moderation, branding, user management
        const ADMIN = 1 << 1;
    }
}

impl Roles {
    pub fn from_flags(is_admin: bool, is_judge: bool) -> Self {
        let mut roles = Roles::empty();
        roles.set(Roles::ADMIN, is_admin);
        roles.set(Roles::JUDGE, is_judge);
        roles
    }

    /// Check a required role; admins bypass the check
    #[inline]
    pub fn has(&self, required: Roles) -> bool {
        self.contains(Roles::ADMIN) || self.contains(required)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.contains(Roles::ADMIN)
    }

    #[inline]
    pub fn can_judge(&self) -> bool {
        self.has(Roles::JUDGE)
    }

    /// Names of the set flags, lowercase
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "ADMIN" => "admin",
                "JUDGE" => "judge",
                _ => "unknown",
            })
            .collect()
    }
}

impl Serialize for Roles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}
