//! Search request lifecycle: publication, budget changes, cancellation.
//!
//! Stays run noon to noon. A request published for a same-day check-in
//! gets a short offer window; everything else gets a day.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_core::{AppError, AppResult};
use inlive_database::repositories::{
    DictionaryRepository, DistrictRepository, SearchRequestRepository, UnitMatchCriteria,
    UnitRepository,
};
use inlive_entity::dictionary::{Dictionary, DictionaryKey};
use inlive_entity::district::District;
use inlive_entity::search_request::{CreateSearchRequest, SearchRequest, SearchRequestStatus};
use inlive_entity::unit::UnitType;

use crate::context::RequestContext;
use crate::services::ensure_dictionary_entries;

/// Check-in and check-out hour, UTC.
const CHECKOVER_HOUR: u32 = 12;

/// Offer window for a same-day check-in.
const SAME_DAY_WINDOW: Duration = Duration::hours(8);

/// Offer window for a future check-in.
const STANDARD_WINDOW: Duration = Duration::hours(24);

/// Parameters for publishing a search request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSearchRequest {
    pub from_rating: Option<f64>,
    pub to_rating: Option<f64>,
    pub check_in: NaiveDate,
    pub check_out: Option<NaiveDate>,
    pub one_night: bool,
    pub price: f64,
    pub count_of_people: Option<i32>,
    pub unit_types: Vec<UnitType>,
    pub service_ids: Vec<i64>,
    pub condition_ids: Vec<i64>,
    pub district_ids: Vec<i64>,
}

/// A search request with its link tables resolved.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequestDetails {
    #[serde(flatten)]
    pub request: SearchRequest,
    pub unit_types: Vec<UnitType>,
    pub dictionaries: Vec<Dictionary>,
    pub districts: Vec<District>,
}

#[derive(Clone)]
pub struct SearchRequestService {
    search_requests: SearchRequestRepository,
    units: UnitRepository,
    districts: DistrictRepository,
    dictionaries: DictionaryRepository,
}

impl SearchRequestService {
    pub fn new(
        search_requests: SearchRequestRepository,
        units: UnitRepository,
        districts: DistrictRepository,
        dictionaries: DictionaryRepository,
    ) -> Self {
        Self {
            search_requests,
            units,
            districts,
            dictionaries,
        }
    }

    /// Publish a search request authored by the caller.
    ///
    /// Publication is refused when no available unit could satisfy the
    /// request as stated, so owners never see unanswerable requests.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: NewSearchRequest,
    ) -> AppResult<SearchRequest> {
        if data.price <= 0.0 {
            return Err(AppError::validation("Price must be positive"));
        }
        if data.unit_types.is_empty() {
            return Err(AppError::validation("At least one unit type is required"));
        }
        if data.district_ids.is_empty() {
            return Err(AppError::validation("At least one district is required"));
        }

        let (from_date, to_date) = stay_period(data.check_in, data.check_out, data.one_night)?;

        for district_id in &data.district_ids {
            self.districts
                .find_by_id(*district_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("District {district_id} not found")))?;
        }
        ensure_dictionary_entries(
            &self.dictionaries,
            &data.service_ids,
            &[DictionaryKey::AccService],
        )
        .await?;
        ensure_dictionary_entries(
            &self.dictionaries,
            &data.condition_ids,
            &[DictionaryKey::AccCondition],
        )
        .await?;

        let mut dictionary_ids = data.service_ids.clone();
        dictionary_ids.extend_from_slice(&data.condition_ids);

        let criteria = UnitMatchCriteria {
            unit_types: data.unit_types.clone(),
            district_ids: data.district_ids.clone(),
            from_rating: data.from_rating,
            to_rating: data.to_rating,
            capacity: data.count_of_people.unwrap_or(1),
            dictionary_ids: dictionary_ids.clone(),
            max_price: Some(data.price),
            check_in: from_date,
            check_out: to_date,
        };
        if self.units.count_matching(&criteria).await? == 0 {
            return Err(AppError::validation(
                "No available units match the requested parameters",
            ));
        }

        let now = Utc::now();
        let create = CreateSearchRequest {
            author_id: ctx.user_id,
            from_rating: data.from_rating,
            to_rating: data.to_rating,
            from_date: Some(from_date),
            to_date: Some(to_date),
            one_night: Some(data.one_night),
            price: data.price,
            count_of_people: data.count_of_people,
            unit_types: data.unit_types,
            dictionary_ids,
            district_ids: data.district_ids,
        };
        let request = self
            .search_requests
            .create(&create, expiry_for(data.check_in, now))
            .await?;

        info!(
            id = request.id,
            author_id = ctx.user_id,
            expires_at = %request.expires_at,
            "search request published"
        );
        Ok(request)
    }

    /// Fetch a search request with its link tables resolved.
    pub async fn details(&self, id: i64) -> AppResult<SearchRequestDetails> {
        let request = self.get(id).await?;

        let unit_types = self
            .search_requests
            .find_unit_types(id)
            .await?
            .into_iter()
            .map(|l| l.unit_type)
            .collect();

        let dictionary_links = self.search_requests.find_dictionaries(id).await?;
        let ids: Vec<i64> = dictionary_links.iter().map(|l| l.dictionary_id).collect();
        let dictionaries = self.dictionaries.find_by_ids(&ids).await?;

        let mut districts = Vec::new();
        for link in self.search_requests.find_districts(id).await? {
            if let Some(district) = self.districts.find_by_id(link.district_id).await? {
                districts.push(district);
            }
        }

        Ok(SearchRequestDetails {
            request,
            unit_types,
            dictionaries,
            districts,
        })
    }

    /// List the caller's own search requests, paginated.
    pub async fn my_requests(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SearchRequest>> {
        self.search_requests.find_by_author(ctx.user_id, page).await
    }

    /// Change the budget on an active request. Author only.
    pub async fn update_price(
        &self,
        ctx: &RequestContext,
        id: i64,
        price: f64,
    ) -> AppResult<SearchRequest> {
        if price <= 0.0 {
            return Err(AppError::validation("Price must be positive"));
        }

        let request = self.authored_active(ctx, id).await?;
        self.search_requests.update_price(request.id, price).await
    }

    /// Cancel an active request. Author only.
    pub async fn cancel(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let request = self.authored_active(ctx, id).await?;

        self.search_requests
            .update_status(request.id, SearchRequestStatus::Cancelled)
            .await?;
        self.search_requests.soft_delete(request.id).await?;

        info!(id, author_id = ctx.user_id, "search request cancelled");
        Ok(())
    }

    /// Fetch a single search request.
    pub async fn get(&self, id: i64) -> AppResult<SearchRequest> {
        self.search_requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Search request {id} not found")))
    }

    /// Load a request, verify the caller authored it and that it has not
    /// reached a terminal status.
    async fn authored_active(&self, ctx: &RequestContext, id: i64) -> AppResult<SearchRequest> {
        let request = self.get(id).await?;
        if request.author_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the author can modify a search request",
            ));
        }
        if request.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Search request is already {}",
                request.status
            )));
        }
        Ok(request)
    }
}

/// Normalize the stay to noon-to-noon datetimes.
///
/// A one-night stay checks out at noon the next day; otherwise an explicit
/// check-out strictly after check-in is required.
fn stay_period(
    check_in: NaiveDate,
    check_out: Option<NaiveDate>,
    one_night: bool,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let from = at_noon(check_in);
    let to = if one_night {
        at_noon(check_in + Duration::days(1))
    } else {
        let check_out =
            check_out.ok_or_else(|| AppError::validation("Check-out date is required"))?;
        if check_out <= check_in {
            return Err(AppError::validation("Check-out must be after check-in"));
        }
        at_noon(check_out)
    };
    Ok((from, to))
}

fn at_noon(date: NaiveDate) -> DateTime<Utc> {
    // noon always exists; the fallback is midnight and never taken
    let noon = NaiveTime::from_hms_opt(CHECKOVER_HOUR, 0, 0).unwrap_or_default();
    date.and_time(noon).and_utc()
}

/// Offer window: short for same-day check-ins, a full day otherwise.
fn expiry_for(check_in: NaiveDate, now: DateTime<Utc>) -> DateTime<Utc> {
    if check_in == now.date_naive() {
        now + SAME_DAY_WINDOW
    } else {
        now + STANDARD_WINDOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[test]
    fn test_one_night_stay_checks_out_next_noon() {
        let (from, to) = stay_period(date("2026-09-10"), None, true).expect("valid period");
        assert_eq!(from.to_rfc3339(), "2026-09-10T12:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2026-09-11T12:00:00+00:00");
    }

    #[test]
    fn test_multi_night_stay_requires_check_out() {
        assert!(stay_period(date("2026-09-10"), None, false).is_err());

        let (from, to) = stay_period(date("2026-09-10"), Some(date("2026-09-14")), false)
            .expect("valid period");
        assert_eq!(from.to_rfc3339(), "2026-09-10T12:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2026-09-14T12:00:00+00:00");
    }

    #[test]
    fn test_check_out_must_follow_check_in() {
        assert!(stay_period(date("2026-09-10"), Some(date("2026-09-10")), false).is_err());
        assert!(stay_period(date("2026-09-10"), Some(date("2026-09-09")), false).is_err());
    }

    #[test]
    fn test_same_day_check_in_gets_short_window() {
        let now = Utc::now();
        let today = now.date_naive();

        assert_eq!(expiry_for(today, now), now + Duration::hours(8));
        assert_eq!(
            expiry_for(today + Duration::days(3), now),
            now + Duration::hours(24)
        );
    }
}
