//! Alarm definitions
//!
//! Alarm names must be unique across a whole dashboard, so every name is
//! built by [`alarm_name`], which always appends the configured base name.

use super::metric::MetricSource;
use crate::config::GlobalConfig;
use serde::{Deserialize, Serialize};

/// How the alarm treats periods with no datapoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreatMissingData {
    Breaching,
    NotBreaching,
    /// Alarm goes to INSUFFICIENT_DATA when data stops arriving
    #[default]
    Missing,
    Ignore,
}

impl TreatMissingData {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breaching => "breaching",
            Self::NotBreaching => "notBreaching",
            Self::Missing => "missing",
            Self::Ignore => "ignore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[default]
    GreaterThanOrEqualToThreshold,
    GreaterThanThreshold,
    LessThanThreshold,
    LessThanOrEqualToThreshold,
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterThanOrEqualToThreshold => "GreaterThanOrEqualToThreshold",
            Self::GreaterThanThreshold => "GreaterThanThreshold",
            Self::LessThanThreshold => "LessThanThreshold",
            Self::LessThanOrEqualToThreshold => "LessThanOrEqualToThreshold",
        }
    }
}

/// Evaluation shape shared by many alarms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmProps {
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub datapoints_to_alarm: u32,
    pub treat_missing_data: TreatMissingData,
}

impl AlarmProps {
    pub const fn new(
        threshold: f64,
        evaluation_periods: u32,
        datapoints_to_alarm: u32,
        treat_missing_data: TreatMissingData,
    ) -> Self {
        Self {
            threshold,
            evaluation_periods,
            datapoints_to_alarm,
            treat_missing_data,
        }
    }
}

/// A standing rule over a metric or derived expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmDefinition {
    pub name: String,
    pub source: MetricSource,
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub datapoints_to_alarm: u32,
    pub treat_missing_data: TreatMissingData,
    pub comparison_operator: ComparisonOperator,
}

impl AlarmDefinition {
    pub fn new(name: String, source: impl Into<MetricSource>, props: AlarmProps) -> Self {
        Self {
            name,
            source: source.into(),
            threshold: props.threshold,
            evaluation_periods: props.evaluation_periods,
            datapoints_to_alarm: props.datapoints_to_alarm,
            treat_missing_data: props.treat_missing_data,
            comparison_operator: ComparisonOperator::default(),
        }
    }
}

/// Build `<prefix>-<part>-...-<BaseName>`
///
/// Callers pass the resource identifier and region as parts; the base name is
/// always folded in last.
pub fn alarm_name(prefix: &str, parts: &[&str], config: &GlobalConfig) -> String {
    let mut name = String::from(prefix);
    for part in parts.iter().filter(|p| !p.is_empty()) {
        name.push('-');
        name.push_str(part);
    }
    name.push('-');
    name.push_str(&config.base_name);
    name
}
