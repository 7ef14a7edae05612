use std::collections::HashMap;

use serde::Serialize;

use crate::analytics::reports::{self, SustainabilityRating};

#[derive(Serialize)]
pub struct EsgReport {
    pub esg_score: Option<f64>,
    pub scored_value_share: Option<f64>,
    pub rating: String,
    pub transaction_count: usize,
}

impl From<Option<reports::EsgReport>> for EsgReport {
    fn from(report: Option<reports::EsgReport>) -> Self {
        match report {
            Some(report) => Self {
                esg_score: Some(report.weighted_score),
                scored_value_share: Some(report.scored_value_share),
                rating: report.rating.to_string(),
                transaction_count: report.transaction_count,
            },
            // An account with no transactions has nothing to grade.
            None => Self {
                esg_score: None,
                scored_value_share: None,
                rating: SustainabilityRating::NotApplicable.to_string(),
                transaction_count: 0,
            },
        }
    }
}

#[derive(Serialize)]
pub struct CarbonFootprint {
    pub total_co2_kg: f64,
    pub period_days: u32,
    pub by_ticker: HashMap<String, f64>,
}

impl From<reports::CarbonFootprint> for CarbonFootprint {
    fn from(footprint: reports::CarbonFootprint) -> Self {
        Self {
            total_co2_kg: footprint.total_kg,
            period_days: footprint.period_days,
            by_ticker: footprint.by_ticker,
        }
    }
}
