//! S3 bucket widget set. No alarms.

use super::console::{encode, link};
use super::{WidgetSet, WidgetSetOutput};
use crate::cloudwatch::{GraphWidget, Layout, Metric, Statistic, TextWidget, Unit, ONE_MINUTE};
use crate::config::GlobalConfig;
use crate::error::{Error, Result};
use crate::resource::{Arn, ResourceDescriptor};
use serde::Deserialize;
use serde_json::Value;

const NAMESPACE: &str = "AWS/S3";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Encryption {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(default)]
    bucket_key_enabled: Option<bool>,
}

pub struct S3WidgetSet;

impl WidgetSet for S3WidgetSet {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn build(&self, resource: &ResourceDescriptor, _config: &GlobalConfig) -> Result<WidgetSetOutput> {
        let arn = Arn::parse(resource.arn()?)?;
        let bucket = arn.last_segment()?;
        // Bucket identifiers carry no region; discovery records it separately.
        // Metric widgets are rejected by the backend without one.
        let region = resource
            .str_field("Region")
            .or_else(|| Some(arn.region()).filter(|r| !r.is_empty()))
            .ok_or(Error::MissingField("Region"))?;

        let mut layout = Layout::new();
        layout.add_row([TextWidget::header(header_markdown(resource, bucket, region)?)]);

        let metric = |name: &str, statistic: Statistic| {
            Metric::new(NAMESPACE, name)
                .dimension("BucketName", bucket)
                .statistic(statistic)
                .period(ONE_MINUTE)
                .region(region)
        };

        layout.add_row([
            GraphWidget::new(&format!("Number of Objects {}", bucket))
                .region(region)
                .left([metric("NumberOfObjects", Statistic::Average)
                    .dimension("StorageType", "AllStorageTypes")])
                .width(8),
            GraphWidget::new("Total Storage")
                .region(region)
                .left([metric("BucketSizeBytes", Statistic::Average)
                    .dimension("StorageType", "StandardStorage")
                    .unit(Unit::Bytes)])
                .width(8),
            GraphWidget::new("Requests")
                .region(region)
                .left([metric("GetRequests", Statistic::Sum)])
                .right([
                    metric("PutRequests", Statistic::Sum),
                    metric("PostRequests", Statistic::Sum),
                ])
                .period(ONE_MINUTE)
                .width(8),
        ]);

        Ok(WidgetSetOutput::new(layout, Vec::new()))
    }
}

/// `Encryption` is an object when a default encryption rule exists and
/// `false` (or absent) otherwise
fn header_markdown(
    resource: &ResourceDescriptor,
    bucket: &str,
    region: &str,
) -> Result<String> {
    let url = format!("https://console.aws.amazon.com/s3/buckets/{}/", encode(bucket));
    let mut markdown = format!("#### Bucket {}", link(bucket, &url));

    match resource.lookup("Encryption") {
        Some(value @ Value::Object(_)) => {
            let encryption = Encryption::deserialize(value)?;
            markdown.push_str(&format!(
                " Encrypted: {}, BucketKeyEnabled: {}",
                encryption.kind,
                encryption.bucket_key_enabled.unwrap_or(false)
            ));
        }
        _ => markdown.push_str(" Not Encrypted"),
    }

    markdown.push_str(&format!(", Region: {}", region));
    Ok(markdown)
}
