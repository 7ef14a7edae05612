use std::collections::HashMap;
use std::fmt;

/// Letter grade summarizing a weighted ESG score. Band lower bounds are
/// inclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SustainabilityRating {
    A,
    B,
    C,
    D,
    F,
    /// No score was available to grade.
    NotApplicable,
}

impl SustainabilityRating {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => Self::NotApplicable,
            Some(score) if score >= 80.0 => Self::A,
            Some(score) if score >= 60.0 => Self::B,
            Some(score) if score >= 40.0 => Self::C,
            Some(score) if score >= 20.0 => Self::D,
            Some(_) => Self::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for SustainabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value weighted ESG position of an account.
#[derive(Clone, Debug, PartialEq)]
pub struct EsgReport {
    /// Weighted average ESG score across the account's scored transactions,
    /// rounded to two decimal places.
    pub weighted_score: f64,
    /// The share of the account's absolute transaction value that carried an
    /// ESG score. Transactions without a score are excluded from the average,
    /// so this makes the size of the exclusion visible.
    pub scored_value_share: f64,
    pub rating: SustainabilityRating,
    pub transaction_count: usize,
}

/// Carbon attribution for an account over a trailing window.
#[derive(Clone, Debug, PartialEq)]
pub struct CarbonFootprint {
    /// Total kilograms of CO2 equivalent, rounded to two decimal places.
    pub total_kg: f64,
    /// The size of the trailing window, in days.
    pub period_days: u32,
    /// Cumulative kilograms per asset ticker. Transactions without a ticker
    /// contribute to the total but not to this breakdown.
    pub by_ticker: HashMap<String, f64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rating_band_lower_bounds_are_inclusive() {
        assert_eq!(SustainabilityRating::A, SustainabilityRating::from_score(Some(80.0)));
        assert_eq!(SustainabilityRating::B, SustainabilityRating::from_score(Some(60.0)));
        assert_eq!(SustainabilityRating::C, SustainabilityRating::from_score(Some(40.0)));
        assert_eq!(SustainabilityRating::D, SustainabilityRating::from_score(Some(20.0)));
    }

    #[test]
    fn rating_below_lowest_band_is_f() {
        assert_eq!(SustainabilityRating::F, SustainabilityRating::from_score(Some(19.99)));
        assert_eq!(SustainabilityRating::F, SustainabilityRating::from_score(Some(0.0)));
    }

    #[test]
    fn rating_top_of_scale_is_a() {
        assert_eq!(SustainabilityRating::A, SustainabilityRating::from_score(Some(100.0)));
    }

    #[test]
    fn missing_score_is_not_applicable() {
        assert_eq!(
            SustainabilityRating::NotApplicable,
            SustainabilityRating::from_score(None)
        );
        assert_eq!("N/A", SustainabilityRating::NotApplicable.to_string());
    }
}
