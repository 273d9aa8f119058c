//! Resource Dispatch
//!
//! Maps each resource to the widget set for its kind and concatenates the
//! results in input order.

use super::descriptor::ResourceDescriptor;
use super::registry::ResourceKind;
use crate::cloudwatch::{AlarmDefinition, Row, Widget};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::widgetsets::{widget_set_for, WidgetSetOutput};
use serde::Serialize;
use std::collections::HashSet;

/// Resource that produced no widgets because its widget set failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedResource {
    pub identifier: String,
    pub reason: String,
}

/// Final output of one composition pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositionResult {
    pub rows: Vec<Row>,
    pub alarms: Vec<AlarmDefinition>,
    pub skipped: Vec<SkippedResource>,
}

impl CompositionResult {
    /// Widgets in dashboard order (rows flattened)
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.rows.iter().flat_map(|row| row.widgets())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.alarms.is_empty()
    }

    fn append(&mut self, output: WidgetSetOutput) {
        self.rows.extend(output.rows);
        self.alarms.extend(output.alarms);
    }
}

/// Compose a dashboard from a resource list.
///
/// Unrecognized kinds are ignored. A resource whose widget set fails is
/// skipped and recorded; the rest of the dashboard is still composed.
pub fn compose(resources: &[ResourceDescriptor], config: &GlobalConfig) -> CompositionResult {
    let mut result = CompositionResult::default();

    for resource in resources {
        let identifier = resource.identifier().unwrap_or("<no identifier>");

        let Some(kind) = resource.kind() else {
            tracing::debug!("compose: no widget set for {}", identifier);
            continue;
        };

        match build_resource(kind, resource, config) {
            Ok(output) => result.append(output),
            Err(e) => {
                tracing::warn!(
                    "Skipping {} {}: {}",
                    kind.display_name(),
                    identifier,
                    e
                );
                result.skipped.push(SkippedResource {
                    identifier: identifier.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    warn_duplicate_alarm_names(&result.alarms);

    tracing::info!(
        "Composed {} rows and {} alarms ({} resources skipped)",
        result.rows.len(),
        result.alarms.len(),
        result.skipped.len()
    );

    result
}

/// Run the widget set for one resource
pub fn build_resource(
    kind: ResourceKind,
    resource: &ResourceDescriptor,
    config: &GlobalConfig,
) -> Result<WidgetSetOutput> {
    let widget_set = widget_set_for(kind);
    tracing::debug!(
        "compose: kind={}, namespace={}, resource={}",
        kind.as_str(),
        widget_set.namespace(),
        resource.identifier().unwrap_or("<no identifier>")
    );
    widget_set.build(resource, config)
}

fn warn_duplicate_alarm_names(alarms: &[AlarmDefinition]) {
    let mut seen = HashSet::new();
    for alarm in alarms {
        if !seen.insert(alarm.name.as_str()) {
            tracing::warn!("Duplicate alarm name: {}", alarm.name);
        }
    }
}
