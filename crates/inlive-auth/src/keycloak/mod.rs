//! Outbound Keycloak REST client.
//!
//! Two surfaces: the OpenID Connect token endpoints (login, refresh, logout)
//! and the realm admin API (user lifecycle, role assignment).

pub mod admin;
pub mod client;
pub mod types;

pub use admin::KeycloakAdminClient;
pub use client::KeycloakClient;
pub use types::{NewKeycloakUser, TokenResponse};
