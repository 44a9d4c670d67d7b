//! Feed estimate endpoints (JSON estimates + printable report documents)

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::animal::AnimalCategory,
    services::reports::RenderedReport,
};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of the monthly feed estimate request. All three parameters are
/// required; month -1 designates a synthetic 30-day period.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EstimateFeedRequest {
    /// Fasting weekday (0 = Sunday .. 6 = Saturday, -1 = none)
    pub fasting_day: Option<i32>,
    /// Month 1-12, or -1 for a fixed 30-day period
    pub month: Option<i32>,
    pub year: Option<i32>,
}

impl EstimateFeedRequest {
    /// Surface missing/out-of-range parameters as one 400-class error
    pub fn validated(&self) -> AppResult<(i32, i32, i32)> {
        let (Some(fasting_day), Some(month), Some(year)) =
            (self.fasting_day, self.month, self.year)
        else {
            return Err(AppError::BadRequest(
                "Missing required parameters: fasting_day, month, year".to_string(),
            ));
        };
        if month != -1 && !(1..=12).contains(&month) {
            return Err(AppError::BadRequest("Invalid month value".to_string()));
        }
        if !(2000..=2100).contains(&year) {
            return Err(AppError::BadRequest("Invalid year value".to_string()));
        }
        Ok((fasting_day, month, year))
    }
}

/// Supply order request: the monthly estimate parameters plus the order
/// header fields printed on the document
#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplyOrderRequest {
    pub file_number: Option<String>,
    pub memo_number: Option<String>,
    /// Order date as printed on the document
    pub date: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_address: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub terms_conditions: Option<String>,
    pub fasting_day: Option<i32>,
}

/// Query parameters for the per-day category estimate
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PerDayEstimateQuery {
    /// Month 1-12 (defaults to the current month)
    pub month: Option<i32>,
    /// Year (defaults to the current year)
    pub year: Option<i32>,
    /// Fasting weekday (0 = Sunday .. 6 = Saturday, -1 = none)
    #[serde(alias = "fastingDay")]
    pub fasting_day: Option<i32>,
    /// Animal category ID
    pub category: Option<i32>,
}

/// Query parameters for the yearly category estimate
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct YearlyEstimateQuery {
    /// Year (defaults to the current year)
    pub year: Option<i32>,
    /// Fasting weekday (0 = Sunday .. 6 = Saturday, -1 = none)
    #[serde(alias = "fastingDay")]
    pub fasting_day: Option<i32>,
    /// Animal category ID
    pub category: Option<i32>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Feeding-day breakdown of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeedingDayInfo {
    pub total_days: u32,
    pub feeding_days: u32,
    pub fasting_days: u32,
}

/// One feed item line of the monthly estimate
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedEstimateLine {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub quantity_per_day: f64,
    pub total_quantity: f64,
    pub price_per_unit: i32,
    pub total_price: f64,
}

/// Monthly feed consumption and cost estimate across the whole diet table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedEstimate {
    pub month: i32,
    pub year: i32,
    pub total_days: u32,
    pub feeding_days: u32,
    pub fasting_days: u32,
    pub estimates: Vec<FeedEstimateLine>,
    pub total_price: f64,
    pub currency: String,
}

/// A species of the requested category with its feed-eligible head count
/// (latest population closing, male + female)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryAnimal {
    pub id: i32,
    pub name: String,
    /// Head count used as the diet multiplier
    pub quantity: i32,
}

/// Feeding-day info with display names, as used by the category tables
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DaysInfo {
    pub total_days: u32,
    pub feeding_days: u32,
    pub fasting_days: u32,
    pub fasting_day_name: String,
    pub month_name: String,
}

/// One (feed item, species) cell of the per-day cross-tab
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct DietCell {
    /// Daily quantity per adult animal
    pub per_animal: f64,
    /// Daily quantity for the species' whole head count
    pub required_for_quantity: f64,
}

/// One feed item row of the per-day cross-tab, cells keyed by species ID
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PerDayFeedRow {
    pub id: i32,
    pub name: String,
    pub unit: String,
    #[schema(value_type = Object)]
    pub diets: IndexMap<i32, DietCell>,
    pub daily_total: f64,
}

/// Per-day feed requirement table for one animal category
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PerDayEstimate {
    pub month: i32,
    pub year: i32,
    pub fasting_day: i32,
    pub category: AnimalCategory,
    pub days_info: DaysInfo,
    pub animals: Vec<CategoryAnimal>,
    pub feed_items: Vec<PerDayFeedRow>,
    /// Per-species daily totals, keyed by species ID
    #[schema(value_type = Object)]
    pub column_totals: IndexMap<i32, f64>,
    pub grand_total: f64,
}

/// Per-month metadata of the yearly estimate
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthInfo {
    pub month: u32,
    pub month_name: String,
    pub days_in_month: u32,
    pub fasting_occurrences: u32,
    /// Feeding days of the month (days minus fasting occurrences)
    pub effective_days: u32,
}

/// One feed item row of the yearly table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct YearlyFeedRow {
    pub id: i32,
    pub name: String,
    pub unit: String,
    /// Daily requirement across all species of the category (month-invariant)
    pub quantity_per_day: f64,
    /// Totals for January..December
    pub monthly_totals: Vec<f64>,
    pub year_total: f64,
    pub rate_per_kg: i32,
    pub annual_cost: f64,
}

/// Per-species monthly totals of the yearly table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpeciesMonthlyTotals {
    pub species_id: i32,
    pub name: String,
    /// Totals for January..December
    pub monthly_totals: Vec<f64>,
    pub year_total: f64,
}

/// Column totals of the yearly table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyGrandTotals {
    /// Totals for January..December
    pub months: Vec<f64>,
    pub year_total: f64,
}

/// Yearly feed requirement and cost projection for one animal category
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct YearlyEstimate {
    pub year: i32,
    pub fasting_day: i32,
    pub fasting_day_name: String,
    pub category: AnimalCategory,
    pub animals: Vec<CategoryAnimal>,
    pub months_info: Vec<MonthInfo>,
    pub total_effective_days_in_year: u32,
    pub feed_items_table: Vec<YearlyFeedRow>,
    pub monthly_grand_totals: MonthlyGrandTotals,
    pub animals_monthly_totals: Vec<SpeciesMonthlyTotals>,
    pub yearly_grand_total: f64,
    pub total_annual_cost: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn document_response(report: RenderedReport) -> Response {
    let disposition = if report.inline {
        format!("inline; filename=\"{}\"", report.filename)
    } else {
        format!("attachment; filename=\"{}\"", report.filename)
    };
    (
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response()
}

fn require_category(category: Option<i32>) -> AppResult<i32> {
    category.ok_or_else(|| AppError::BadRequest("Missing required parameter: category".to_string()))
}

fn validated_month(month: i32) -> AppResult<i32> {
    if month != -1 && !(1..=12).contains(&month) {
        return Err(AppError::BadRequest("Invalid month value".to_string()));
    }
    Ok(month)
}

fn validated_year(year: i32) -> AppResult<i32> {
    if !(2000..=2100).contains(&year) {
        return Err(AppError::BadRequest("Invalid year value".to_string()));
    }
    Ok(year)
}

/// Compute the monthly feed consumption estimate
#[utoipa::path(
    post,
    path = "/estimates/feed",
    tag = "estimates",
    request_body = EstimateFeedRequest,
    responses(
        (status = 200, description = "Feed estimate", body = FeedEstimate),
        (status = 400, description = "Missing or invalid parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn estimate_feed(
    State(state): State<crate::AppState>,
    Json(data): Json<EstimateFeedRequest>,
) -> AppResult<Json<FeedEstimate>> {
    let (fasting_day, month, year) = data.validated()?;
    let estimate = state
        .services
        .estimates
        .generate_feed_estimates(fasting_day, month, year)
        .await?;
    Ok(Json(estimate))
}

/// Per-day feed requirement table for a category
#[utoipa::path(
    get,
    path = "/estimates/per-day",
    tag = "estimates",
    params(PerDayEstimateQuery),
    responses(
        (status = 200, description = "Per-day estimate table", body = PerDayEstimate),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn per_day_estimate(
    State(state): State<crate::AppState>,
    Query(query): Query<PerDayEstimateQuery>,
) -> AppResult<Json<PerDayEstimate>> {
    let now = Utc::now();
    let month = validated_month(query.month.unwrap_or(now.month() as i32))?;
    let year = validated_year(query.year.unwrap_or(now.year()))?;
    let fasting_day = query.fasting_day.unwrap_or(-1);
    let category_id = require_category(query.category)?;

    let estimate = state
        .services
        .estimates
        .per_day_estimate(month, year, fasting_day, category_id)
        .await?;
    Ok(Json(estimate))
}

/// Yearly feed requirement table for a category
#[utoipa::path(
    get,
    path = "/estimates/yearly",
    tag = "estimates",
    params(YearlyEstimateQuery),
    responses(
        (status = 200, description = "Yearly estimate table", body = YearlyEstimate),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn yearly_estimate(
    State(state): State<crate::AppState>,
    Query(query): Query<YearlyEstimateQuery>,
) -> AppResult<Json<YearlyEstimate>> {
    let year = validated_year(query.year.unwrap_or(Utc::now().year()))?;
    let fasting_day = query.fasting_day.unwrap_or(-1);
    let category_id = require_category(query.category)?;

    let estimate = state
        .services
        .estimates
        .yearly_estimate(year, fasting_day, category_id)
        .await?;
    Ok(Json(estimate))
}

/// Generate a supply order document
#[utoipa::path(
    post,
    path = "/estimates/supply-order",
    tag = "estimates",
    request_body = SupplyOrderRequest,
    responses(
        (status = 200, description = "Supply order document", content_type = "text/html"),
        (status = 400, description = "Missing parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn generate_supply_order(
    State(state): State<crate::AppState>,
    Json(data): Json<SupplyOrderRequest>,
) -> AppResult<Response> {
    let order = state.services.reports.validated_supply_order(&data)?;
    validated_month(order.month)?;
    validated_year(order.year)?;
    let estimate = state
        .services
        .estimates
        .generate_feed_estimates(order.fasting_day, order.month, order.year)
        .await?;
    let report = state.services.reports.supply_order(&order, &estimate)?;
    Ok(document_response(report))
}

/// Generate a pricing estimate document
#[utoipa::path(
    post,
    path = "/estimates/pricing",
    tag = "estimates",
    request_body = EstimateFeedRequest,
    responses(
        (status = 200, description = "Pricing estimate document", content_type = "text/html"),
        (status = 400, description = "Missing parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn generate_pricing_estimate(
    State(state): State<crate::AppState>,
    Json(data): Json<EstimateFeedRequest>,
) -> AppResult<Response> {
    let (fasting_day, month, year) = data.validated()?;
    let estimate = state
        .services
        .estimates
        .generate_feed_estimates(fasting_day, month, year)
        .await?;
    let report = state
        .services
        .reports
        .pricing_estimate(fasting_day, &estimate)?;
    Ok(document_response(report))
}

/// Export the per-day category table as a printable document
#[utoipa::path(
    get,
    path = "/estimates/per-day/export",
    tag = "estimates",
    params(PerDayEstimateQuery),
    responses(
        (status = 200, description = "Per-day estimate document", content_type = "text/html"),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn export_per_day_estimate(
    State(state): State<crate::AppState>,
    Query(query): Query<PerDayEstimateQuery>,
) -> AppResult<Response> {
    let now = Utc::now();
    let month = validated_month(query.month.unwrap_or(now.month() as i32))?;
    let year = validated_year(query.year.unwrap_or(now.year()))?;
    let fasting_day = query.fasting_day.unwrap_or(-1);
    let category_id = require_category(query.category)?;

    let estimate = state
        .services
        .estimates
        .per_day_estimate(month, year, fasting_day, category_id)
        .await?;
    let report = state.services.reports.per_day_table(&estimate)?;
    Ok(document_response(report))
}

/// Export the yearly category table as a printable document
#[utoipa::path(
    get,
    path = "/estimates/yearly/export",
    tag = "estimates",
    params(YearlyEstimateQuery),
    responses(
        (status = 200, description = "Yearly estimate document", content_type = "text/html"),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn export_yearly_estimate(
    State(state): State<crate::AppState>,
    Query(query): Query<YearlyEstimateQuery>,
) -> AppResult<Response> {
    let year = validated_year(query.year.unwrap_or(Utc::now().year()))?;
    let fasting_day = query.fasting_day.unwrap_or(-1);
    let category_id = require_category(query.category)?;

    let estimate = state
        .services
        .estimates
        .yearly_estimate(year, fasting_day, category_id)
        .await?;
    let report = state.services.reports.yearly_table(&estimate)?;
    Ok(document_response(report))
}
