use serde::{Deserialize, Serialize};

/// Effective permission level a user holds over a plant or location.
///
/// The ordering is load-bearing: capability checks compare roles with
/// `>=`, so the discriminants are written out explicitly instead of
/// relying on declaration order. `Viewer < Carer < Editor < Owner`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Role {
    Viewer = 0,
    Carer = 1,
    Editor = 2,
    Owner = 3,
}

/// A checkable action on a plant or location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    View,
    Care,
    Edit,
    Delete,
    Share,
}

impl Role {
    /// Numeric ordinal backing the comparison order.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Any resolved role may view.
    pub fn can_view(self) -> bool {
        true
    }

    /// Water, fertilize, photograph.
    pub fn can_care(self) -> bool {
        self >= Role::Carer
    }

    /// Rename, change schedule, reassign location.
    pub fn can_edit(self) -> bool {
        self >= Role::Editor
    }

    /// Deletion is reserved for the literal owner role, not Editor.
    pub fn can_delete(self) -> bool {
        self == Role::Owner
    }

    /// Creating, modifying or revoking shares on the entity.
    pub fn can_share(self) -> bool {
        self == Role::Owner
    }

    /// Check a single capability against this role.
    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.can_view(),
            Capability::Care => self.can_care(),
            Capability::Edit => self.can_edit(),
            Capability::Delete => self.can_delete(),
            Capability::Share => self.can_share(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Viewer => "viewer",
            Role::Carer => "carer",
            Role::Editor => "editor",
            Role::Owner => "owner",
        };
        write!(f, "{}", name)
    }
}
