//! Lambda function widget set

use super::console::{console_url, link};
use super::{WidgetSet, WidgetSetOutput};
use crate::cloudwatch::{
    alarm_name, AlarmDefinition, AlarmProps, GraphWidget, Layout, Metric, Statistic, TextWidget,
    TreatMissingData, ONE_MINUTE,
};
use crate::config::GlobalConfig;
use crate::error::{Error, Result};
use crate::resource::{Arn, ResourceDescriptor};
use serde::Deserialize;

const NAMESPACE: &str = "AWS/Lambda";

const THROTTLE_ALARM: AlarmProps = AlarmProps::new(10.0, 3, 3, TreatMissingData::NotBreaching);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FunctionConfiguration {
    #[serde(default)]
    memory_size: Option<u64>,
    #[serde(default)]
    runtime: Option<String>,
}

pub struct LambdaWidgetSet;

impl WidgetSet for LambdaWidgetSet {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn build(&self, resource: &ResourceDescriptor, config: &GlobalConfig) -> Result<WidgetSetOutput> {
        let arn = Arn::parse(resource.arn()?)?;
        let region = arn.require_region()?;
        let function_name = function_name(&arn)?;
        let display_name = resource
            .tag_value("Name")
            .unwrap_or_else(|| function_name.to_string());
        let configuration: FunctionConfiguration =
            resource.field("Configuration")?.unwrap_or_default();

        let mut layout = Layout::new();

        let url = console_url(
            region,
            "lambda",
            &format!("/functions/{}?tab=monitoring", function_name),
        );
        let mut markdown = format!("### Lambda {}", link(&display_name, &url));
        if let Some(memory) = configuration.memory_size {
            markdown.push_str(&format!(" Mem:{}", memory));
        }
        if let Some(runtime) = &configuration.runtime {
            markdown.push_str(&format!(" RT:{}", runtime));
        }
        layout.add_row([TextWidget::header(markdown)]);

        let metric = |name: &str, statistic: Statistic| {
            Metric::new(NAMESPACE, name)
                .dimension("FunctionName", function_name)
                .statistic(statistic)
                .period(ONE_MINUTE)
        };

        let throttles = metric("Throttles", Statistic::Sum);
        let alarms = vec![AlarmDefinition::new(
            alarm_name("Throttles", &[function_name, region], config),
            throttles.clone(),
            THROTTLE_ALARM,
        )];

        layout.add_row([
            GraphWidget::new(&format!("Invocations {}", function_name))
                .region(region)
                .left([metric("Invocations", Statistic::Sum)])
                .right([metric("Duration", Statistic::Average)])
                .width(6)
                .height(5),
            GraphWidget::new(&format!("Errors/Throttles {}", function_name))
                .region(region)
                .left([metric("Errors", Statistic::Sum)])
                .right([throttles])
                .width(12)
                .height(5),
            GraphWidget::new(&format!("Concurrency {}", function_name))
                .region(region)
                .left([metric("ConcurrentExecutions", Statistic::Maximum)])
                .width(6)
                .height(5),
        ]);

        Ok(WidgetSetOutput::new(layout, alarms))
    }
}

/// `function:<name>[:qualifier]` -> `<name>`
fn function_name<'a>(arn: &Arn<'a>) -> Result<&'a str> {
    let mut parts = arn.resource().split(':');
    match (parts.next(), parts.next()) {
        (Some("function"), Some(name)) if !name.is_empty() => Ok(name),
        _ => Err(Error::malformed(arn.as_str(), "expected function:<name>")),
    }
}
