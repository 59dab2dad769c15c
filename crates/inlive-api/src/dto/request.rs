//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use inlive_auth::NewKeycloakUser;
use inlive_database::repositories::{AccommodationFilter, UnitFilter};
use inlive_entity::accommodation::CreateAccommodation;
use inlive_entity::dictionary::DictionaryKey;
use inlive_entity::price_request::{ClientResponseStatus, CreatePriceRequest};
use inlive_entity::reservation::ReservationStatus;
use inlive_entity::unit::{CreateUnit, RangeType, UnitType};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Client self-registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// First name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Phone number.
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
}

impl From<RegisterRequest> for NewKeycloakUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number,
        }
    }
}

/// Token refresh / logout request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Dictionary search query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionarySearchParams {
    /// Category to filter by.
    pub key: Option<DictionaryKey>,
    /// Value substring to match.
    pub value: Option<String>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

/// Accommodation payload carried in the `data` part of the create form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccommodationRequest {
    /// City ID.
    pub city_id: i64,
    /// District ID.
    pub district_id: i64,
    /// Street address.
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Description.
    #[validate(length(max = 5000))]
    pub description: String,
    /// Condition and service tags.
    #[serde(default)]
    pub dictionary_ids: Vec<i64>,
}

impl CreateAccommodationRequest {
    /// Maps to the storage payload. The owner is resolved from the token
    /// by the service, never from the body.
    pub fn into_create(self) -> CreateAccommodation {
        CreateAccommodation {
            city_id: self.city_id,
            district_id: self.district_id,
            owner_id: 0,
            address: self.address,
            name: self.name,
            description: self.description,
            dictionary_ids: self.dictionary_ids,
        }
    }
}

/// Replace an accommodation's tags under one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccDictionariesRequest {
    /// Category the tags belong to.
    pub key: DictionaryKey,
    /// Replacement tag IDs.
    pub dictionary_ids: Vec<i64>,
}

/// Accommodation search query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccommodationSearchParams {
    /// City to filter by.
    pub city_id: Option<i64>,
    /// District to filter by.
    pub district_id: Option<i64>,
    /// Approval state to filter by.
    pub approved: Option<bool>,
    /// Minimum rating.
    pub min_rating: Option<f64>,
    /// Name substring to match.
    pub name: Option<String>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl AccommodationSearchParams {
    pub fn filter(&self) -> AccommodationFilter {
        AccommodationFilter {
            city_id: self.city_id,
            district_id: self.district_id,
            approved: self.approved,
            owner_id: None,
            min_rating: self.min_rating,
            name: self.name.clone(),
        }
    }
}

/// Unit payload carried in the `data` part of the create form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUnitRequest {
    /// Parent accommodation ID.
    pub acc_id: i64,
    /// Unit type.
    pub unit_type: UnitType,
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Description.
    #[validate(length(max = 5000))]
    pub description: String,
    /// Sleeping capacity.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    /// Area in square metres.
    pub area: Option<f64>,
    /// Floor number.
    pub floor: Option<i32>,
    /// Condition tags.
    #[serde(default)]
    pub dictionary_ids: Vec<i64>,
}

impl From<CreateUnitRequest> for CreateUnit {
    fn from(req: CreateUnitRequest) -> Self {
        Self {
            acc_id: req.acc_id,
            unit_type: req.unit_type,
            name: req.name,
            description: req.description,
            capacity: req.capacity,
            area: req.area,
            floor: req.floor,
            dictionary_ids: req.dictionary_ids,
        }
    }
}

/// Replace a unit's condition tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUnitDictionariesRequest {
    /// Replacement tag IDs.
    pub dictionary_ids: Vec<i64>,
}

/// Add a tariff to a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTariffRequest {
    /// Price per range unit.
    pub price: f64,
    /// Currency code; defaults to the platform currency when omitted.
    pub currency: Option<String>,
    /// Billing range the price covers.
    pub range_type: RangeType,
}

/// Unit search query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitSearchParams {
    /// Parent accommodation to filter by.
    pub acc_id: Option<i64>,
    /// Unit type to filter by.
    pub unit_type: Option<UnitType>,
    /// Availability to filter by.
    pub is_available: Option<bool>,
    /// Name substring to match.
    pub name: Option<String>,
    /// Minimum capacity.
    pub min_capacity: Option<i32>,
    /// Maximum capacity.
    pub max_capacity: Option<i32>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl UnitSearchParams {
    pub fn filter(&self) -> UnitFilter {
        UnitFilter {
            acc_id: self.acc_id,
            unit_type: self.unit_type,
            is_available: self.is_available,
            name: self.name.clone(),
            min_capacity: self.min_capacity,
            max_capacity: self.max_capacity,
        }
    }
}

/// Change the budget on a search request or the price of an offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePriceRequest {
    /// New price.
    pub price: f64,
}

/// Submit a price offer against a search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePriceOfferRequest {
    /// Search request the offer answers.
    pub search_request_id: i64,
    /// Unit being offered.
    pub acc_unit_id: i64,
    /// Offered price.
    pub price: f64,
}

impl From<CreatePriceOfferRequest> for CreatePriceRequest {
    fn from(req: CreatePriceOfferRequest) -> Self {
        Self {
            search_request_id: req.search_request_id,
            acc_unit_id: req.acc_unit_id,
            price: req.price,
        }
    }
}

/// The search-request author's answer to an offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondToOfferRequest {
    /// ACCEPTED or REJECTED.
    pub response: ClientResponseStatus,
}

/// Reserve an accepted offer explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    /// The accepted offer to reserve.
    pub price_request_id: i64,
}

/// Owner verdict or final outcome for a reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusRequest {
    /// Target status.
    pub status: ReservationStatus,
}
