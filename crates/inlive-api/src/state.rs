//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use inlive_auth::TokenDecoder;
use inlive_core::config::AppConfig;
use inlive_database::repositories::UserRepository;
use inlive_service::services::{
    AccommodationService, AuthService, CityService, DictionaryService, DistrictService,
    PriceRequestService, ReservationService, SearchRequestService, UnitService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Services and
/// repositories clone cheaply (they share the connection pool), so only
/// the configuration and the token decoder are `Arc`-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Inbound access-token validator.
    pub decoder: Arc<TokenDecoder>,
    /// User repository, used by the auth extractor to resolve the caller.
    pub users: UserRepository,

    /// Login, registration and session management.
    pub auth_service: AuthService,
    /// Profile management.
    pub user_service: UserService,
    /// City reference data.
    pub city_service: CityService,
    /// District reference data.
    pub district_service: DistrictService,
    /// Dictionary reference data.
    pub dictionary_service: DictionaryService,
    /// Accommodation listings.
    pub accommodation_service: AccommodationService,
    /// Units, tariffs and unit photos.
    pub unit_service: UnitService,
    /// Search request workflow.
    pub search_request_service: SearchRequestService,
    /// Price offer workflow.
    pub price_request_service: PriceRequestService,
    /// Reservation workflow.
    pub reservation_service: ReservationService,
}
