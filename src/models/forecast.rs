//! Forecast records as delivered upstream and as shown to users

use serde::{Deserialize, Serialize};

/// Number of days kept from the upstream forecast
pub const FORECAST_DAYS: usize = 7;

/// One day of the upstream weather payload; other upstream fields are ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamDay {
    /// Date as `YYYY-MM-DD`
    pub datetime: String,
    pub tempmax: f64,
    pub tempmin: f64,
    pub humidity: f64,
}

/// Display-ready forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day_temp: f64,
    pub night_temp: f64,
    pub humidity: f64,
}

impl From<&UpstreamDay> for ForecastDay {
    fn from(day: &UpstreamDay) -> Self {
        Self {
            date: day.datetime.clone(),
            day_temp: day.tempmax,
            night_temp: day.tempmin,
            humidity: day.humidity,
        }
    }
}

/// Keep the first [`FORECAST_DAYS`] upstream days in upstream order
#[must_use]
pub fn shape_forecast(days: &[UpstreamDay]) -> Vec<ForecastDay> {
    days.iter()
        .take(FORECAST_DAYS)
        .map(ForecastDay::from)
        .collect()
}
