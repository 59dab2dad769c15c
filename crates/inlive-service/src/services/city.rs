//! Read-only city reference data.

use inlive_core::AppResult;
use inlive_database::repositories::CityRepository;
use inlive_entity::city::City;

#[derive(Clone)]
pub struct CityService {
    cities: CityRepository,
}

impl CityService {
    pub fn new(cities: CityRepository) -> Self {
        Self { cities }
    }

    /// List all cities.
    pub async fn list(&self) -> AppResult<Vec<City>> {
        self.cities.find_all().await
    }
}
