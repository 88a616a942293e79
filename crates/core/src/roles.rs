//! Agency roles and the approval authority rule.
//!
//! Role names must match the `role` claim issued in access tokens. The
//! mapping from role to approval scope is an exhaustive match so a new role
//! cannot be added without deciding what it may approve.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::approval::Scope;
use crate::error::CoreError;

pub const ROLE_MARKETING_MANAGER: &str = "marketing_manager";
pub const ROLE_ACCOUNT_MANAGER: &str = "account_manager";
pub const ROLE_CONTENT_WRITER: &str = "content_writer";
pub const ROLE_GRAPHICS_DESIGNER: &str = "graphics_designer";
pub const ROLE_MARKETING_DIRECTOR: &str = "marketing_director";
pub const ROLE_ACCOUNTANT: &str = "accountant";
pub const ROLE_USER: &str = "user";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_MARKETING_MANAGER,
    ROLE_ACCOUNT_MANAGER,
    ROLE_CONTENT_WRITER,
    ROLE_GRAPHICS_DESIGNER,
    ROLE_MARKETING_DIRECTOR,
    ROLE_ACCOUNTANT,
    ROLE_USER,
];

/// The acting user's role within the agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    MarketingManager,
    AccountManager,
    ContentWriter,
    GraphicsDesigner,
    MarketingDirector,
    Accountant,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarketingManager => ROLE_MARKETING_MANAGER,
            Self::AccountManager => ROLE_ACCOUNT_MANAGER,
            Self::ContentWriter => ROLE_CONTENT_WRITER,
            Self::GraphicsDesigner => ROLE_GRAPHICS_DESIGNER,
            Self::MarketingDirector => ROLE_MARKETING_DIRECTOR,
            Self::Accountant => ROLE_ACCOUNTANT,
            Self::User => ROLE_USER,
        }
    }

    /// The single approval scope this role may act on, if any.
    pub fn approval_scope(&self) -> Option<Scope> {
        match self {
            Self::MarketingManager => Some(Scope::Internal),
            Self::AccountManager => Some(Scope::Client),
            Self::ContentWriter
            | Self::GraphicsDesigner
            | Self::MarketingDirector
            | Self::Accountant
            | Self::User => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_MARKETING_MANAGER => Ok(Self::MarketingManager),
            ROLE_ACCOUNT_MANAGER => Ok(Self::AccountManager),
            ROLE_CONTENT_WRITER => Ok(Self::ContentWriter),
            ROLE_GRAPHICS_DESIGNER => Ok(Self::GraphicsDesigner),
            ROLE_MARKETING_DIRECTOR => Ok(Self::MarketingDirector),
            ROLE_ACCOUNTANT => Ok(Self::Accountant),
            ROLE_USER => Ok(Self::User),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

/// Whether `role` may toggle approvals in `scope`.
///
/// Internal approvals belong to the marketing manager, client approvals to
/// the account manager. Every other role is denied.
pub fn can_act(role: Role, scope: Scope) -> bool {
    role.approval_scope() == Some(scope)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 7] = [
        Role::MarketingManager,
        Role::AccountManager,
        Role::ContentWriter,
        Role::GraphicsDesigner,
        Role::MarketingDirector,
        Role::Accountant,
        Role::User,
    ];

    #[test]
    fn test_marketing_manager_acts_on_internal_only() {
        assert!(can_act(Role::MarketingManager, Scope::Internal));
        assert!(!can_act(Role::MarketingManager, Scope::Client));
    }

    #[test]
    fn test_account_manager_acts_on_client_only() {
        assert!(can_act(Role::AccountManager, Scope::Client));
        assert!(!can_act(Role::AccountManager, Scope::Internal));
    }

    #[test]
    fn test_other_roles_denied_everywhere() {
        for role in ALL_ROLES {
            if matches!(role, Role::MarketingManager | Role::AccountManager) {
                continue;
            }
            assert!(!can_act(role, Scope::Internal), "{role} must not act on internal");
            assert!(!can_act(role, Scope::Client), "{role} must not act on client");
        }
    }

    #[test]
    fn test_role_names_round_trip() {
        assert_eq!(VALID_ROLES.len(), ALL_ROLES.len());
        for role in ALL_ROLES {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "admin".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("Invalid role 'admin'"));
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::GraphicsDesigner).unwrap();
        assert_eq!(json, "\"graphics_designer\"");
    }
}
