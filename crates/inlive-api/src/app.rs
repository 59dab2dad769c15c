//! Application assembly: repositories, clients, services, router.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use inlive_auth::{KeycloakAdminClient, KeycloakClient, TokenDecoder};
use inlive_core::AppResult;
use inlive_core::config::AppConfig;
use inlive_database::repositories::{
    AccommodationRepository, CityRepository, DictionaryRepository, DistrictRepository,
    PriceRequestRepository, ReservationRepository, SearchRequestRepository, UnitRepository,
    UserRepository,
};
use inlive_file_client::{FileManagerClient, ServiceTokenProvider};
use inlive_service::services::{
    AccommodationService, AuthService, CityService, DictionaryService, DistrictService,
    PriceRequestService, ReservationService, SearchRequestService, UnitService, UserService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Wire every dependency together and return the ready-to-serve router.
pub fn build_app(config: AppConfig, pool: PgPool) -> AppResult<Router> {
    let users = UserRepository::new(pool.clone());
    let cities = CityRepository::new(pool.clone());
    let districts = DistrictRepository::new(pool.clone());
    let dictionaries = DictionaryRepository::new(pool.clone());
    let accommodations = AccommodationRepository::new(pool.clone());
    let units = UnitRepository::new(pool.clone());
    let search_requests = SearchRequestRepository::new(pool.clone());
    let price_requests = PriceRequestRepository::new(pool.clone());
    let reservations = ReservationRepository::new(pool);

    let decoder = TokenDecoder::new(config.keycloak.clone());
    let keycloak = KeycloakClient::new(config.keycloak.clone())?;
    let admin = KeycloakAdminClient::new(config.keycloak.clone())?;
    let tokens = ServiceTokenProvider::new(config.keycloak.clone())?;
    let files = FileManagerClient::new(config.file_api.clone(), tokens)?;

    let auth_service = AuthService::new(keycloak, admin, users.clone());
    let user_service = UserService::new(users.clone(), files.clone());
    let city_service = CityService::new(cities.clone());
    let district_service = DistrictService::new(districts.clone(), cities.clone());
    let dictionary_service = DictionaryService::new(dictionaries.clone());
    let accommodation_service = AccommodationService::new(
        accommodations.clone(),
        cities,
        districts.clone(),
        dictionaries.clone(),
        search_requests.clone(),
        files.clone(),
    );
    let unit_service = UnitService::new(
        units.clone(),
        accommodations.clone(),
        dictionaries.clone(),
        search_requests.clone(),
        price_requests.clone(),
        reservations.clone(),
        files,
    );
    let search_request_service = SearchRequestService::new(
        search_requests.clone(),
        units.clone(),
        districts,
        dictionaries,
    );
    let price_request_service = PriceRequestService::new(
        price_requests.clone(),
        search_requests.clone(),
        units.clone(),
        accommodations.clone(),
        reservations.clone(),
    );
    let reservation_service = ReservationService::new(
        reservations,
        price_requests,
        search_requests,
        units,
        accommodations,
    );

    let state = AppState {
        config: Arc::new(config),
        decoder: Arc::new(decoder),
        users,
        auth_service,
        user_service,
        city_service,
        district_service,
        dictionary_service,
        accommodation_service,
        unit_service,
        search_request_service,
        price_request_service,
        reservation_service,
    };

    Ok(build_router(state))
}
