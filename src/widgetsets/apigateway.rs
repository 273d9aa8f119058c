//! REST API gateway widget set
//!
//! Row layout depends on whether any stage has a cache cluster:
//!
//! | caching | row                                  |
//! |---------|--------------------------------------|
//! | no      | traffic (12), errors/latency (12)    |
//! | yes     | traffic (6), cache (9), errors (9)   |

use super::console::{console_url, encode, link};
use super::{WidgetSet, WidgetSetOutput};
use crate::cloudwatch::{
    alarm_name, AlarmDefinition, AlarmProps, GraphWidget, Layout, MathExpression, Metric,
    Statistic, TextWidget, TreatMissingData, ONE_MINUTE,
};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::resource::{Arn, ResourceDescriptor};
use serde::Deserialize;

const NAMESPACE: &str = "AWS/ApiGateway";

const ERROR_ALARM: AlarmProps = AlarmProps::new(1000.0, 1, 1, TreatMissingData::NotBreaching);
const CACHE_MISS_ALARM: AlarmProps = AlarmProps::new(25.0, 5, 5, TreatMissingData::NotBreaching);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stage {
    stage_name: String,
    /// `null` when no cache was ever configured
    #[serde(default)]
    cache_cluster_enabled: Option<bool>,
}

impl Stage {
    fn is_cached(&self) -> bool {
        self.cache_cluster_enabled == Some(true)
    }
}

pub struct ApiGatewayWidgetSet;

impl WidgetSet for ApiGatewayWidgetSet {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn build(&self, resource: &ResourceDescriptor, config: &GlobalConfig) -> Result<WidgetSetOutput> {
        let arn = Arn::parse(resource.arn()?)?;
        let region = arn.require_region()?;
        let api_id = arn.last_path_segment()?;
        let api_name = resource.str_field("name").unwrap_or(api_id);
        let stages: Vec<Stage> = resource.list("stages")?;
        let has_caching = stages.iter().any(Stage::is_cached);

        let mut layout = Layout::new();
        let mut alarms = Vec::new();

        layout.add_row([TextWidget::header(header_markdown(
            api_name, api_id, region, &stages,
        ))]);

        let metric = |name: &str, statistic: Statistic| {
            Metric::new(NAMESPACE, name)
                .dimension("ApiName", api_name)
                .statistic(statistic)
                .period(ONE_MINUTE)
        };

        let traffic_metric = metric("Count", Statistic::SampleCount);
        let status_4xx = metric("4XXError", Statistic::Sum);
        let status_5xx = metric("5XXError", Statistic::Sum);

        alarms.push(AlarmDefinition::new(
            alarm_name("Error4xxAlarm", &[api_name, api_id, region], config),
            status_4xx.clone(),
            ERROR_ALARM,
        ));
        alarms.push(AlarmDefinition::new(
            alarm_name("Error5xxAlarm", &[api_name, api_id, region], config),
            status_5xx.clone(),
            ERROR_ALARM,
        ));

        let (traffic_width, errors_width) = if has_caching { (6, 9) } else { (12, 12) };

        let traffic = GraphWidget::new(&format!("Count {}", api_name))
            .stacked()
            .region(region)
            .left([traffic_metric])
            .width(traffic_width);

        let errors = GraphWidget::new(&format!("Errors/Latency {}", api_name))
            .stacked()
            .region(region)
            .left([status_4xx, status_5xx])
            .right([
                metric("Latency", Statistic::Average),
                metric("IntegrationLatency", Statistic::Average),
            ])
            .width(errors_width);

        if has_caching {
            let miss_percentage = MathExpression::new("(missMetric/hitMetric) * 100")
                .using("missMetric", metric("CacheMissCount", Statistic::Sum))
                .using("hitMetric", metric("CacheHitCount", Statistic::Sum))
                .label("Miss ratio in %");

            alarms.push(AlarmDefinition::new(
                alarm_name("CacheMissAlarm", &[api_id, region], config),
                miss_percentage.clone(),
                CACHE_MISS_ALARM,
            ));

            let cache = GraphWidget::new("CacheHit/CacheMiss")
                .stacked()
                .region(region)
                .left([miss_percentage])
                .left_y_axis(0.0, 100.0)
                .width(9);

            layout.add_row([traffic, cache, errors]);
        } else {
            layout.add_row([traffic, errors]);
        }

        Ok(WidgetSetOutput::new(layout, alarms))
    }
}

/// Title with a link to the API, then one link per stage, cached stages marked
fn header_markdown(api_name: &str, api_id: &str, region: &str, stages: &[Stage]) -> String {
    let api_url = console_url(region, "apigateway", &format!("/apis/{}/resources", api_id));
    let mut markdown = format!("### API GW {}", link(api_name, &api_url));

    if !stages.is_empty() {
        markdown.push_str(" Stages: |");
        for stage in stages {
            let stage_url = console_url(
                region,
                "apigateway",
                &format!("/apis/{}/stages/{}", api_id, encode(&stage.stage_name)),
            );
            markdown.push(' ');
            markdown.push_str(&link(&stage.stage_name, &stage_url));
            if stage.is_cached() {
                markdown.push_str("(**cached**)");
            }
            markdown.push_str(" |");
        }
    }

    markdown
}
