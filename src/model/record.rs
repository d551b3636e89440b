//! Typed daily climate records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportPeriod;

/// Column names of a reconstructed table, in output order.
///
/// The day column is folded into `date`, which comes last.
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "avg temperature",
    "max temp",
    "min temp",
    "rain",
    "rain type",
    "snow depth",
    "snow type",
    "sun hours",
    "avg wind",
    "max wind",
    "gust",
    "date",
];

/// Precipitation type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainType {
    /// Snow
    #[serde(rename = "sn")]
    Snow,
    /// Sleet
    #[serde(rename = "sl")]
    Sleet,
    /// Rain
    #[serde(rename = "ri")]
    Rain,
}

impl RainType {
    /// Look up a two-letter report code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sn" => Some(RainType::Snow),
            "sl" => Some(RainType::Sleet),
            "ri" => Some(RainType::Rain),
            _ => None,
        }
    }

    /// Get the two-letter report code.
    pub fn code(&self) -> &'static str {
        match self {
            RainType::Snow => "sn",
            RainType::Sleet => "sl",
            RainType::Rain => "ri",
        }
    }
}

/// One day of a monthly climate report.
///
/// Empty cells become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    /// Synthesized `YYYY-MM-DD`, not checked against the calendar
    pub date: String,

    /// Day of month as printed in the report
    pub day: u32,

    /// Mean temperature (°C)
    pub avg_temperature: Option<f64>,

    /// Maximum temperature (°C)
    pub max_temperature: Option<f64>,

    /// Minimum temperature (°C)
    pub min_temperature: Option<f64>,

    /// Precipitation (mm)
    pub rain: Option<f64>,

    /// Precipitation type
    pub rain_type: Option<RainType>,

    /// Snow depth code
    pub snow_depth: Option<String>,

    /// Snow cover code
    pub snow_type: Option<String>,

    /// Sunshine (hours)
    pub sun_hours: Option<f64>,

    /// Mean wind speed (m/s)
    pub avg_wind: Option<f64>,

    /// Maximum wind speed (m/s)
    pub max_wind: Option<f64>,

    /// Maximum gust (m/s)
    pub gust: Option<f64>,
}

impl ClimateRecord {
    /// Get the record as display cells in [`OUTPUT_COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        fn num(v: Option<f64>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }

        vec![
            num(self.avg_temperature),
            num(self.max_temperature),
            num(self.min_temperature),
            num(self.rain),
            self.rain_type
                .map(|r| r.code().to_string())
                .unwrap_or_default(),
            self.snow_depth.clone().unwrap_or_default(),
            self.snow_type.clone().unwrap_or_default(),
            num(self.sun_hours),
            num(self.avg_wind),
            num(self.max_wind),
            num(self.gust),
            self.date.clone(),
        ]
    }
}

/// Reconstructed table of one monthly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateTable {
    /// Month the report covers
    pub period: ReportPeriod,

    /// One record per table row, top row first
    pub records: Vec<ClimateRecord>,
}

impl ClimateTable {
    /// Create a table.
    pub fn new(period: ReportPeriod, records: Vec<ClimateRecord>) -> Self {
        Self { period, records }
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the calendar date of a record, if it exists in this period.
    pub fn calendar_date(&self, record: &ClimateRecord) -> Option<NaiveDate> {
        self.period.date(record.day)
    }

    /// Iterate over records whose date exists in the calendar.
    pub fn valid_records(&self) -> impl Iterator<Item = &ClimateRecord> {
        self.records
            .iter()
            .filter(|r| self.calendar_date(r).is_some())
    }

    /// Drop records whose date does not exist, e.g. 30 February.
    pub fn retain_valid_dates(&mut self) {
        let period = self.period;
        self.records.retain(|r| period.date(r.day).is_some());
    }
}
