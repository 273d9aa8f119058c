//! End-to-end composition tests
//!
//! These tests run the whole pipeline (resource file, composition,
//! rendering) against small hand-written inventories.

use cwdash::cloudwatch::{TreatMissingData, GRID_WIDTH};
use cwdash::resource::{load_resources, parse_resources};
use cwdash::{compose, render_document, GlobalConfig};
use serde_json::{json, Value};
use std::io::Write;

fn inventory() -> Value {
    json!([
        {
            "ResourceARN": "arn:aws:elasticloadbalancing:eu-west-1:123:loadbalancer/app/web/50dc6c",
            "Extras": {"LoadBalancerName": "web", "Type": "application"},
            "TargetGroups": [
                {"TargetGroupArn": "arn:aws:elasticloadbalancing:eu-west-1:123:targetgroup/blue/aa11"},
                {"TargetGroupArn": "arn:aws:elasticloadbalancing:eu-west-1:123:targetgroup/green/bb22"}
            ]
        },
        {
            "ResourceARN": "arn:aws:lambda:eu-west-1:123:function:orders",
            "Tags": [{"Key": "Name", "Value": "Order intake"}]
        }
    ])
}

#[test]
fn test_load_balancer_and_function() {
    let resources = parse_resources(&inventory().to_string()).unwrap();
    let result = compose(&resources, &GlobalConfig::new("shop"));

    // ALB: header + 2 metric rows, 2 target group alarms + 2 balancer alarms
    // Lambda: header + 1 metric row, 1 throttle alarm
    assert_eq!(result.rows.len(), 5);
    assert_eq!(result.alarms.len(), 5);
    assert!(result.skipped.is_empty());

    for row in &result.rows {
        assert_eq!(row.width(), GRID_WIDTH);
    }

    let names: Vec<&str> = result.alarms.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Unhealthy-Hosts-Alarm-targetgroup/blue/aa11-eu-west-1-shop",
            "Unhealthy-Hosts-Alarm-targetgroup/green/bb22-eu-west-1-shop",
            "5xxAlarm-web-50dc6c-eu-west-1-shop",
            "Backend5xxAlarm-web-50dc6c-eu-west-1-shop",
            "Throttles-orders-eu-west-1-shop",
        ]
    );
    assert!(result
        .alarms
        .iter()
        .all(|a| a.treat_missing_data == TreatMissingData::NotBreaching));

    let lambda_header = result.rows[3].widgets()[0].as_text().unwrap();
    assert!(lambda_header.markdown.contains("[Order intake]"));
}

#[test]
fn test_mixed_inventory_skips_only_bad_records() {
    let resources = parse_resources(
        &json!([
            {"ResourceARN": "arn:aws:sqs:eu-west-1:123:jobs"},
            {"ResourceARN": "arn:aws:ec2:eu-west-1:123:natgateway/nat-1"},
            {"ResourceARN": "arn:aws:lambda:eu-west-1:123:function:", "Kind": "lambda_function"},
            {"ResourceARN": "arn:aws:s3:::assets", "Region": "eu-west-1"},
            {"ResourceARN": "arn:aws:s3:::regionless"}
        ])
        .to_string(),
    )
    .unwrap();
    let result = compose(&resources, &GlobalConfig::new("shop"));

    let skipped: Vec<&str> = result
        .skipped
        .iter()
        .map(|s| s.identifier.as_str())
        .collect();
    assert_eq!(
        skipped,
        vec!["arn:aws:lambda:eu-west-1:123:function:", "arn:aws:s3:::regionless"]
    );
    assert!(result.skipped[1].reason.contains("Region"));
    // NAT: 2 rows, 2 alarms; bucket: 2 rows, no alarms
    assert_eq!(result.rows.len(), 4);
    assert_eq!(result.alarms.len(), 2);
}

#[test]
fn test_rendered_document() {
    let resources = parse_resources(&inventory().to_string()).unwrap();
    let config = GlobalConfig::new("shop");
    let result = compose(&resources, &config);
    let document = render_document(&result, &config).unwrap();

    assert_eq!(document.dashboard_name, "shop-Dashboard");
    assert_eq!(document.alarms.len(), 5);

    let body: Value = serde_json::from_str(&document.dashboard_body).unwrap();
    let widgets = body["widgets"].as_array().unwrap();
    assert_eq!(widgets.len(), result.widgets().count());

    // Every widget stays on the grid and rows never overlap
    let mut last_y = 0;
    for widget in widgets {
        let x = widget["x"].as_u64().unwrap();
        let y = widget["y"].as_u64().unwrap();
        let width = widget["width"].as_u64().unwrap();
        assert!(x + width <= u64::from(GRID_WIDTH));
        assert!(y >= last_y);
        last_y = y;
        if widget["type"] == "metric" {
            assert!(widget["properties"]["region"].is_string());
        }
    }

    let alarm = serde_json::to_value(&document.alarms[4]).unwrap();
    assert_eq!(alarm["AlarmName"], "Throttles-orders-eu-west-1-shop");
    assert_eq!(alarm["Namespace"], "AWS/Lambda");
    assert_eq!(alarm["MetricName"], "Throttles");
    assert_eq!(alarm["TreatMissingData"], "notBreaching");
}

#[test]
fn test_cached_api_renders_expression_alarm() {
    let resources = parse_resources(
        &json!([{
            "ResourceARN": "arn:aws:apigateway:eu-west-1::/restapis/a1b2c3",
            "name": "orders",
            "stages": [{"stageName": "prod", "cacheClusterEnabled": true}]
        }])
        .to_string(),
    )
    .unwrap();
    let config = GlobalConfig::new("shop");
    let result = compose(&resources, &config);
    let document = render_document(&result, &config).unwrap();

    let cache_alarm = document
        .alarms
        .iter()
        .find(|a| a.alarm_name.starts_with("CacheMissAlarm"))
        .unwrap();
    assert!(cache_alarm.metric_name.is_none());
    let queries = cache_alarm.metrics.as_ref().unwrap();
    assert_eq!(queries.len(), 3);
    assert_eq!(queries.iter().filter(|q| q.return_data).count(), 1);
}

#[test]
fn test_resource_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", inventory()).unwrap();

    let resources = load_resources(file.path()).unwrap();
    assert_eq!(resources.len(), 2);

    let missing = load_resources("does-not-exist.json".as_ref()).unwrap();
    assert!(missing.is_empty());
    assert!(compose(&missing, &GlobalConfig::new("shop")).is_empty());
}
