//! Client roles recognized by the marketplace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Keycloak client role assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeycloakRole {
    /// Platform administrator: moderation and reference-data management.
    Admin,
    /// Regular marketplace user.
    Client,
}

impl KeycloakRole {
    /// Return the role as its Keycloak role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Client => "CLIENT",
        }
    }
}

impl fmt::Display for KeycloakRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KeycloakRole {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "CLIENT" => Ok(Self::Client),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: ADMIN, CLIENT"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<KeycloakRole>().ok(), Some(KeycloakRole::Admin));
        assert_eq!("CLIENT".parse::<KeycloakRole>().ok(), Some(KeycloakRole::Client));
        assert!("MANAGER".parse::<KeycloakRole>().is_err());
    }
}
