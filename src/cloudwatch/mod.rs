//! CloudWatch dashboard model
//!
//! Descriptions of metrics, alarms and widgets, the row accumulator widget
//! sets write into, and rendering into backend documents.
//!
//! # Module Structure
//!
//! - [`metric`] - Metrics and derived expressions
//! - [`alarm`] - Alarm definitions and naming
//! - [`widget`] - Text and graph widgets
//! - [`layout`] - Row accumulator
//! - [`render`] - Dashboard body and alarm request rendering

pub mod alarm;
pub mod layout;
pub mod metric;
pub mod render;
pub mod widget;

pub use alarm::{alarm_name, AlarmDefinition, AlarmProps, ComparisonOperator, TreatMissingData};
pub use layout::{Layout, Row};
pub use metric::{MathExpression, Metric, MetricSource, Statistic, Unit, ONE_MINUTE};
pub use render::{render_document, DashboardDocument};
pub use widget::{GraphWidget, TextWidget, Widget, GRID_WIDTH};
