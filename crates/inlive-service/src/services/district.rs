//! Read-only district reference data.

use inlive_core::{AppError, AppResult};
use inlive_database::repositories::{CityRepository, DistrictRepository};
use inlive_entity::district::District;

#[derive(Clone)]
pub struct DistrictService {
    districts: DistrictRepository,
    cities: CityRepository,
}

impl DistrictService {
    pub fn new(districts: DistrictRepository, cities: CityRepository) -> Self {
        Self { districts, cities }
    }

    /// List all districts.
    pub async fn list(&self) -> AppResult<Vec<District>> {
        self.districts.find_all().await
    }

    /// List the districts of one city.
    pub async fn by_city(&self, city_id: i64) -> AppResult<Vec<District>> {
        self.cities
            .find_by_id(city_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("City {city_id} not found")))?;

        self.districts.find_by_city(city_id).await
    }
}
