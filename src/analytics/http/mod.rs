use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{
    analytics::services::{AnalyticsService, DEFAULT_CARBON_PERIOD_DAYS},
    http_err::{ApiError, ApiResponse},
    server::AppState,
};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/:account_id/esg", get(get_account_esg))
        .route(
            "/accounts/:account_id/carbon-footprint",
            get(get_account_carbon_footprint),
        )
}

async fn get_account_esg(
    State(analytics_service): State<AnalyticsService>,
    Path(account_id): Path<Uuid>,
) -> ApiResponse<Json<reps::EsgReport>> {
    match analytics_service.portfolio_esg(account_id).await {
        Ok(report) => Ok(Json(report.into())),
        Err(error) => {
            error!(?error, %account_id, "Failed to compute portfolio ESG score.");

            Err(ApiError::InternalServerError)
        }
    }
}

#[derive(Deserialize)]
struct CarbonFootprintParams {
    period_days: Option<u32>,
}

async fn get_account_carbon_footprint(
    State(analytics_service): State<AnalyticsService>,
    Path(account_id): Path<Uuid>,
    Query(params): Query<CarbonFootprintParams>,
) -> ApiResponse<Json<reps::CarbonFootprint>> {
    let period_days = params.period_days.unwrap_or(DEFAULT_CARBON_PERIOD_DAYS);
    if period_days == 0 {
        return Err(ApiError::BadRequestReason(
            "period_days must be at least 1.".to_owned(),
        ));
    }

    match analytics_service
        .carbon_footprint(account_id, period_days)
        .await
    {
        Ok(footprint) => Ok(Json(footprint.into())),
        Err(error) => {
            error!(?error, %account_id, "Failed to compute carbon footprint.");

            Err(ApiError::InternalServerError)
        }
    }
}
