//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{animals, configuration, diets, estimates, feeds, health, populations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Menagerie API",
        version = "0.4.0",
        description = "Zoo Inventory Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Animals
        animals::list_categories,
        animals::create_category,
        animals::update_category,
        animals::list_animals,
        animals::get_animal,
        animals::create_animal,
        animals::update_animal,
        // Population
        populations::list_records,
        populations::create_record,
        populations::update_record,
        // Diets
        diets::list_diet,
        diets::replace_diet,
        diets::update_diet_item,
        diets::delete_diet_item,
        // Feed catalog
        feeds::list_feed_items,
        feeds::get_feed_item,
        feeds::create_feed_item,
        feeds::update_feed_item,
        // Configuration
        configuration::get_configuration,
        configuration::get_feed_items,
        // Estimates
        estimates::estimate_feed,
        estimates::per_day_estimate,
        estimates::yearly_estimate,
        estimates::generate_supply_order,
        estimates::generate_pricing_estimate,
        estimates::export_per_day_estimate,
        estimates::export_yearly_estimate,
    ),
    components(
        schemas(
            // Animals
            crate::models::animal::AnimalCategory,
            crate::models::animal::CreateAnimalCategory,
            crate::models::animal::UpdateAnimalCategory,
            crate::models::animal::AnimalSpecies,
            crate::models::animal::CreateAnimalSpecies,
            crate::models::animal::UpdateAnimalSpecies,
            crate::models::animal::SpeciesWithPopulation,
            crate::models::enums::ScheduleTag,
            crate::models::enums::DayChoice,
            // Population
            crate::models::population::CountGroup,
            crate::models::population::CountGroupInput,
            crate::models::population::PopulationRecord,
            crate::models::population::SavePopulationRequest,
            // Diets
            crate::models::diet::DietItem,
            crate::models::diet::DietItemDetails,
            crate::models::diet::DietItemInput,
            crate::models::diet::ReplaceDietRequest,
            crate::models::diet::UpdateDietItem,
            crate::services::diets::ReplaceDietSummary,
            // Feed catalog
            crate::models::feed::FeedUnit,
            crate::models::feed::FeedCategory,
            crate::models::feed::FeedItem,
            crate::models::feed::CreateFeedItem,
            crate::models::feed::UpdateFeedItem,
            // Configuration
            configuration::ConfigurationResponse,
            configuration::ScheduleChoice,
            // Estimates
            estimates::EstimateFeedRequest,
            estimates::SupplyOrderRequest,
            estimates::FeedingDayInfo,
            estimates::FeedEstimateLine,
            estimates::FeedEstimate,
            estimates::CategoryAnimal,
            estimates::DaysInfo,
            estimates::DietCell,
            estimates::PerDayFeedRow,
            estimates::PerDayEstimate,
            estimates::MonthInfo,
            estimates::YearlyFeedRow,
            estimates::SpeciesMonthlyTotals,
            estimates::MonthlyGrandTotals,
            estimates::YearlyEstimate,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "animals", description = "Animal categories and species"),
        (name = "population", description = "Population ledger"),
        (name = "diets", description = "Diet composition per species"),
        (name = "feeds", description = "Feed catalog"),
        (name = "configuration", description = "Reference data for forms"),
        (name = "estimates", description = "Feed consumption and cost estimates")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
