//! Metric and derived-expression descriptions
//!
//! These are value objects only. Nothing here queries data; the monitoring
//! backend evaluates whatever the dashboard body and alarm requests describe.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Period used when a metric does not set one (five minutes)
pub const DEFAULT_PERIOD_SECS: u32 = 300;

/// One minute, the period most widget sets aggregate over
pub const ONE_MINUTE: u32 = 60;

/// Aggregation applied to a metric over its period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Statistic {
    SampleCount,
    #[default]
    Average,
    Sum,
    Minimum,
    Maximum,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SampleCount => "SampleCount",
            Self::Average => "Average",
            Self::Sum => "Sum",
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
        }
    }
}

/// Unit filter applied to a metric query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Count,
    Bytes,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Bytes => "Bytes",
        }
    }
}

/// A single named, dimensioned metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub namespace: String,
    pub metric_name: String,
    /// Ordered so that rendering is stable between runs
    pub dimensions: BTreeMap<String, String>,
    pub statistic: Statistic,
    pub period_secs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Metric {
    pub fn new(namespace: &str, metric_name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            metric_name: metric_name.to_string(),
            dimensions: BTreeMap::new(),
            statistic: Statistic::default(),
            period_secs: DEFAULT_PERIOD_SECS,
            unit: None,
            region: None,
            label: None,
        }
    }

    /// Add (or replace) a dimension
    pub fn dimension(mut self, key: &str, value: &str) -> Self {
        self.dimensions.insert(key.to_string(), value.to_string());
        self
    }

    pub fn statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = statistic;
        self
    }

    pub fn period(mut self, secs: u32) -> Self {
        self.period_secs = secs;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// A metric computed by the backend from other metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathExpression {
    pub expression: String,
    /// Input metrics keyed by the id the expression refers to them by
    pub using_metrics: BTreeMap<String, Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MathExpression {
    pub fn new(expression: &str) -> Self {
        Self {
            expression: expression.to_string(),
            using_metrics: BTreeMap::new(),
            label: None,
        }
    }

    pub fn using(mut self, id: &str, metric: Metric) -> Self {
        self.using_metrics.insert(id.to_string(), metric);
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Period of the longest input (the backend aligns inputs to it)
    pub fn period_secs(&self) -> u32 {
        self.using_metrics
            .values()
            .map(|m| m.period_secs)
            .max()
            .unwrap_or(DEFAULT_PERIOD_SECS)
    }
}

/// Anything that can sit on a graph axis or feed an alarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricSource {
    Metric(Metric),
    Expression(MathExpression),
}

impl MetricSource {
    pub fn as_metric(&self) -> Option<&Metric> {
        match self {
            Self::Metric(m) => Some(m),
            Self::Expression(_) => None,
        }
    }
}

impl From<Metric> for MetricSource {
    fn from(metric: Metric) -> Self {
        Self::Metric(metric)
    }
}

impl From<MathExpression> for MetricSource {
    fn from(expression: MathExpression) -> Self {
        Self::Expression(expression)
    }
}
