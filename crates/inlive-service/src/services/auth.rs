//! Authentication flows delegating to the identity provider.

use tracing::{info, warn};

use inlive_auth::keycloak::NewKeycloakUser;
use inlive_auth::{KeycloakAdminClient, KeycloakClient, KeycloakRole, TokenResponse};
use inlive_core::AppResult;
use inlive_database::repositories::UserRepository;
use inlive_entity::user::CreateUser;

/// Login, registration and session management against Keycloak.
#[derive(Clone)]
pub struct AuthService {
    keycloak: KeycloakClient,
    admin: KeycloakAdminClient,
    users: UserRepository,
}

impl AuthService {
    pub fn new(
        keycloak: KeycloakClient,
        admin: KeycloakAdminClient,
        users: UserRepository,
    ) -> Self {
        Self {
            keycloak,
            admin,
            users,
        }
    }

    /// Authenticate a user and return a token pair.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        info!(username = %username, "login attempt");
        self.keycloak.login(username, password).await
    }

    /// Register a new client: create the realm account, mirror the profile
    /// locally, then log the user in.
    ///
    /// When the local profile insert fails the realm account is removed
    /// again so the registration can be retried.
    pub async fn register_client(&self, registration: NewKeycloakUser) -> AppResult<TokenResponse> {
        info!(username = %registration.username, "registration attempt");

        let keycloak_id = self
            .admin
            .register_user(&registration, KeycloakRole::Client)
            .await?;

        let profile = CreateUser {
            keycloak_id: keycloak_id.clone(),
            email: registration.email.clone(),
            phone_number: registration.phone_number.clone(),
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
        };

        if let Err(e) = self.users.create(&profile).await {
            warn!(keycloak_id = %keycloak_id, error = %e, "rolling back realm account after profile insert failure");
            if let Err(cleanup) = self.admin.delete_user(&keycloak_id).await {
                warn!(keycloak_id = %keycloak_id, error = %cleanup, "realm account rollback failed");
            }
            return Err(e);
        }

        self.keycloak
            .login(&registration.username, &registration.password)
            .await
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        self.keycloak.refresh(refresh_token).await
    }

    /// End the session by invalidating the refresh token.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        self.keycloak.logout(refresh_token).await
    }
}
