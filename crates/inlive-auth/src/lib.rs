//! # inlive-auth
//!
//! Keycloak integration for the Inlive backend.
//!
//! ## Modules
//!
//! - `jwt` — inbound access-token validation against the realm JWKS
//! - `roles` — client roles recognized by the marketplace
//! - `keycloak` — outbound Keycloak REST client (token grants, admin API)

pub mod jwt;
pub mod keycloak;
pub mod roles;

pub use jwt::{Claims, TokenDecoder};
pub use keycloak::{KeycloakAdminClient, KeycloakClient, NewKeycloakUser, TokenResponse};
pub use roles::KeycloakRole;
