//! Backend rendering
//!
//! Converts composed rows and alarms into the documents the dashboard
//! provisioning layer consumes: a dashboard body with absolute grid positions
//! and one alarm request per alarm definition.

use super::alarm::AlarmDefinition;
use super::layout::Row;
use super::metric::{MathExpression, Metric, MetricSource};
use super::widget::{GraphWidget, TextBackground, TextWidget, Widget};
use crate::config::GlobalConfig;
use crate::resource::CompositionResult;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Everything needed to provision one dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardDocument {
    pub dashboard_name: String,
    /// Dashboard body, serialized the way the backend expects it
    pub dashboard_body: String,
    pub alarms: Vec<AlarmRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricRef {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricStat {
    pub metric: MetricRef,
    pub period: u32,
    pub stat: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

/// One entry of an expression alarm's `Metrics` list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDataQuery {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_stat: Option<MetricStat>,
    pub return_data: bool,
}

/// Alarm in the shape of a put-alarm request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmRequest {
    pub alarm_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricDataQuery>>,
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub datapoints_to_alarm: u32,
    pub treat_missing_data: &'static str,
    pub comparison_operator: &'static str,
}

/// Render a full composition into a provisioning document
pub fn render_document(
    result: &CompositionResult,
    config: &GlobalConfig,
) -> Result<DashboardDocument, serde_json::Error> {
    let body = dashboard_body(&result.rows);
    Ok(DashboardDocument {
        dashboard_name: config.effective_dashboard_name(),
        dashboard_body: serde_json::to_string(&body)?,
        alarms: result.alarms.iter().map(alarm_request).collect(),
    })
}

/// Lay rows out top to bottom. Each row starts at the running y offset and
/// advances it by its tallest widget.
pub fn dashboard_body(rows: &[Row]) -> Value {
    let mut widgets = Vec::new();
    let mut y = 0;

    for row in rows {
        let mut x = 0;
        for widget in row.widgets() {
            widgets.push(render_widget(widget, x, y));
            x += widget.width();
        }
        y += row.height();
    }

    json!({ "widgets": widgets })
}

fn render_widget(widget: &Widget, x: u32, y: u32) -> Value {
    let (kind, properties) = match widget {
        Widget::Text(text) => ("text", text_properties(text)),
        Widget::Graph(graph) => ("metric", graph_properties(graph)),
    };

    json!({
        "type": kind,
        "x": x,
        "y": y,
        "width": widget.width(),
        "height": widget.height(),
        "properties": properties,
    })
}

fn text_properties(text: &TextWidget) -> Value {
    let mut props = Map::new();
    props.insert("markdown".to_string(), Value::String(text.markdown.clone()));
    if text.background == TextBackground::Transparent {
        props.insert(
            "background".to_string(),
            Value::String("transparent".to_string()),
        );
    }
    Value::Object(props)
}

fn graph_properties(graph: &GraphWidget) -> Value {
    let mut props = Map::new();
    props.insert("view".to_string(), json!("timeSeries"));
    props.insert("title".to_string(), json!(graph.title));
    props.insert("stacked".to_string(), json!(graph.stacked));
    if let Some(region) = &graph.region {
        props.insert("region".to_string(), json!(region));
    }
    if let Some(period) = graph.period_secs {
        props.insert("period".to_string(), json!(period));
    }

    let mut metrics = Vec::new();
    let mut expression_count = 0;
    for (sources, right) in [(&graph.left, false), (&graph.right, true)] {
        for source in sources {
            match source {
                MetricSource::Metric(metric) => {
                    metrics.push(metric_entry(metric, right, None));
                }
                MetricSource::Expression(expr) => {
                    expression_count += 1;
                    let id = format!("expr{}", expression_count);
                    metrics.extend(expression_entries(expr, &id, right));
                }
            }
        }
    }
    props.insert("metrics".to_string(), Value::Array(metrics));

    let mut y_axis = Map::new();
    if let Some(range) = graph.left_y_axis {
        let mut left = Map::new();
        if let Some(min) = range.min {
            left.insert("min".to_string(), json!(min));
        }
        if let Some(max) = range.max {
            left.insert("max".to_string(), json!(max));
        }
        y_axis.insert("left".to_string(), Value::Object(left));
    }
    if !y_axis.is_empty() {
        props.insert("yAxis".to_string(), Value::Object(y_axis));
    }

    Value::Object(props)
}

/// `[namespace, name, dimKey, dimValue, ..., {options}]`
fn metric_entry(metric: &Metric, right: bool, hidden_id: Option<&str>) -> Value {
    let mut entry = vec![json!(metric.namespace), json!(metric.metric_name)];
    for (key, value) in &metric.dimensions {
        entry.push(json!(key));
        entry.push(json!(value));
    }

    let mut options = Map::new();
    options.insert("stat".to_string(), json!(metric.statistic.as_str()));
    options.insert("period".to_string(), json!(metric.period_secs));
    if let Some(region) = &metric.region {
        options.insert("region".to_string(), json!(region));
    }
    if let Some(label) = &metric.label {
        options.insert("label".to_string(), json!(label));
    }
    if right {
        options.insert("yAxis".to_string(), json!("right"));
    }
    if let Some(id) = hidden_id {
        options.insert("id".to_string(), json!(id));
        options.insert("visible".to_string(), json!(false));
    }
    entry.push(Value::Object(options));

    Value::Array(entry)
}

fn expression_entries(expr: &MathExpression, id: &str, right: bool) -> Vec<Value> {
    let mut options = Map::new();
    options.insert("expression".to_string(), json!(expr.expression));
    options.insert("id".to_string(), json!(id));
    if let Some(label) = &expr.label {
        options.insert("label".to_string(), json!(label));
    }
    if right {
        options.insert("yAxis".to_string(), json!("right"));
    }

    let mut entries = vec![json!([Value::Object(options)])];
    for (input_id, metric) in &expr.using_metrics {
        entries.push(metric_entry(metric, right, Some(input_id)));
    }
    entries
}

fn dimensions(metric: &Metric) -> Vec<Dimension> {
    metric
        .dimensions
        .iter()
        .map(|(name, value)| Dimension {
            name: name.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Convert an alarm definition into a put-alarm request
pub fn alarm_request(alarm: &AlarmDefinition) -> AlarmRequest {
    let mut request = AlarmRequest {
        alarm_name: alarm.name.clone(),
        namespace: None,
        metric_name: None,
        dimensions: None,
        statistic: None,
        period: None,
        unit: None,
        metrics: None,
        threshold: alarm.threshold,
        evaluation_periods: alarm.evaluation_periods,
        datapoints_to_alarm: alarm.datapoints_to_alarm,
        treat_missing_data: alarm.treat_missing_data.as_str(),
        comparison_operator: alarm.comparison_operator.as_str(),
    };

    match &alarm.source {
        MetricSource::Metric(metric) => {
            request.namespace = Some(metric.namespace.clone());
            request.metric_name = Some(metric.metric_name.clone());
            request.dimensions = Some(dimensions(metric));
            request.statistic = Some(metric.statistic.as_str());
            request.period = Some(metric.period_secs);
            request.unit = metric.unit.map(|u| u.as_str());
        }
        MetricSource::Expression(expr) => {
            let mut queries = vec![MetricDataQuery {
                id: "expr1".to_string(),
                expression: Some(expr.expression.clone()),
                label: expr.label.clone(),
                metric_stat: None,
                return_data: true,
            }];
            for (id, metric) in &expr.using_metrics {
                queries.push(MetricDataQuery {
                    id: id.clone(),
                    expression: None,
                    label: None,
                    metric_stat: Some(MetricStat {
                        metric: MetricRef {
                            namespace: metric.namespace.clone(),
                            metric_name: metric.metric_name.clone(),
                            dimensions: dimensions(metric),
                        },
                        period: metric.period_secs,
                        stat: metric.statistic.as_str(),
                        unit: metric.unit.map(|u| u.as_str()),
                    }),
                    return_data: false,
                });
            }
            request.metrics = Some(queries);
        }
    }

    request
}
