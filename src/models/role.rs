use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Editor,
    Manager,
    Volunteer,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Manager => "manager",
            Role::Volunteer => "volunteer",
            Role::Viewer => "viewer",
        }
    }

    /// Parks, activities and amenities.
    pub fn can_edit_catalog(&self) -> bool {
        matches!(
            self,
            Role::SuperAdmin | Role::Admin | Role::Editor | Role::Manager
        )
    }

    pub fn can_manage_volunteers(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin | Role::Editor)
    }

    /// Unknown stored values fall back to the least privileged role.
    pub fn from_stored(raw: &str) -> Self {
        raw.parse().unwrap_or(Role::Viewer)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "super_admin" | "superadmin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "manager" => Ok(Role::Manager),
            "volunteer" => Ok(Role::Volunteer),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
