//! ECS service widget set
//!
//! The descriptor is a cluster; every service listed under `services` gets
//! its own header, utilization graph and CPU alarm.

use super::console::{console_url, encode, link};
use super::{WidgetSet, WidgetSetOutput};
use crate::cloudwatch::{
    alarm_name, AlarmDefinition, AlarmProps, GraphWidget, Layout, Metric, Statistic, TextWidget,
    TreatMissingData, GRID_WIDTH, ONE_MINUTE,
};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::resource::{Arn, ResourceDescriptor};
use serde::Deserialize;

const NAMESPACE: &str = "AWS/ECS";

/// Alarms when data stops arriving as well as on sustained high CPU
const CPU_ALARM: AlarmProps = AlarmProps::new(95.0, 3, 3, TreatMissingData::Missing);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EcsService {
    service_arn: String,
    service_name: String,
    #[serde(default)]
    running_count: Option<u64>,
}

pub struct EcsServiceWidgetSet;

impl WidgetSet for EcsServiceWidgetSet {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn build(&self, resource: &ResourceDescriptor, config: &GlobalConfig) -> Result<WidgetSetOutput> {
        let cluster_arn = Arn::parse(resource.arn()?)?;
        let cluster_name = match resource.str_field("cluster.clusterName") {
            Some(name) => name,
            None => cluster_arn.last_path_segment()?,
        };
        let services: Vec<EcsService> = resource.list("services")?;

        tracing::debug!(
            "ECS cluster {}: {} services",
            cluster_name,
            services.len()
        );

        let mut output = WidgetSetOutput::default();
        for service in &services {
            output.extend(build_service(service, cluster_name, config)?);
        }
        Ok(output)
    }
}

fn build_service(
    service: &EcsService,
    cluster_name: &str,
    config: &GlobalConfig,
) -> Result<WidgetSetOutput> {
    let arn = Arn::parse(&service.service_arn)?;
    let region = arn.require_region()?;
    let service_name = service.service_name.as_str();

    let mut layout = Layout::new();
    layout.add_row([TextWidget::header(header_markdown(
        service,
        cluster_name,
        region,
    ))]);

    let utilization = |name: &str| {
        Metric::new(NAMESPACE, name)
            .dimension("ClusterName", cluster_name)
            .dimension("ServiceName", service_name)
            .statistic(Statistic::Average)
            .period(ONE_MINUTE)
            .region(region)
    };

    // Cluster and service names may contain '-' but never '/'
    let qualified_name = format!("{}/{}", cluster_name, service_name);
    let cpu = utilization("CPUUtilization");
    let alarms = vec![AlarmDefinition::new(
        alarm_name("CPUUtilisationAlarm", &[qualified_name.as_str(), region], config),
        cpu.clone(),
        CPU_ALARM,
    )];

    layout.add_row([GraphWidget::new("CPU/Memory Utilisation")
        .region(region)
        .left([cpu])
        .right([utilization("MemoryUtilization")])
        .period(ONE_MINUTE)
        .width(GRID_WIDTH)]);

    Ok(WidgetSetOutput::new(layout, alarms))
}

fn header_markdown(service: &EcsService, cluster_name: &str, region: &str) -> String {
    let cluster = encode(cluster_name);
    let service_url = console_url(
        region,
        "ecs",
        &format!(
            "/clusters/{}/services/{}/details",
            cluster,
            encode(&service.service_name)
        ),
    );
    let cluster_url = console_url(region, "ecs", &format!("/clusters/{}/services", cluster));

    let mut markdown = format!(
        "***ECS Service {} {}",
        link(&service.service_name, &service_url),
        link(cluster_name, &cluster_url)
    );
    if let Some(running) = service.running_count {
        markdown.push_str(&format!(" Tasks: {}", running));
    }
    markdown.push_str("***");
    markdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn cluster(services: Value) -> ResourceDescriptor {
        ResourceDescriptor::new(json!({
            "ResourceARN": "arn:aws:ecs:eu-west-1:123:cluster/main",
            "cluster": {"clusterName": "main"},
            "services": services
        }))
    }

    fn service(name: &str) -> Value {
        json!({
            "serviceArn": format!("arn:aws:ecs:eu-west-1:123:service/main/{}", name),
            "serviceName": name,
            "runningCount": 2
        })
    }

    fn build(resource: &ResourceDescriptor) -> WidgetSetOutput {
        EcsServiceWidgetSet
            .build(resource, &GlobalConfig::new("prod"))
            .unwrap()
    }

    #[test]
    fn test_fan_out_per_service() {
        let output = build(&cluster(json!([service("api"), service("worker")])));
        assert_eq!(output.rows.len(), 4);
        assert_eq!(output.alarms.len(), 2);
        for row in &output.rows {
            assert_eq!(row.width(), GRID_WIDTH);
        }
        assert_eq!(
            output.alarms[1].name,
            "CPUUtilisationAlarm-main/worker-eu-west-1-prod"
        );
    }

    #[test]
    fn test_cpu_alarm_treats_missing_as_missing() {
        let output = build(&cluster(json!([service("api")])));
        let alarm = &output.alarms[0];
        assert_eq!(alarm.treat_missing_data, TreatMissingData::Missing);
        assert_eq!(alarm.threshold, 95.0);
        assert_eq!(alarm.evaluation_periods, 3);
        assert_eq!(alarm.datapoints_to_alarm, 3);
    }

    #[test]
    fn test_shared_graph() {
        let output = build(&cluster(json!([service("api")])));
        let graph = output.rows[1].widgets()[0].as_graph().unwrap();
        let cpu = graph.left[0].as_metric().unwrap();
        let memory = graph.right[0].as_metric().unwrap();
        assert_eq!(cpu.metric_name, "CPUUtilization");
        assert_eq!(memory.metric_name, "MemoryUtilization");
        assert_eq!(cpu.dimensions["ClusterName"], "main");
        assert_eq!(cpu.dimensions["ServiceName"], "api");
    }

    #[test]
    fn test_header() {
        let output = build(&cluster(json!([service("api")])));
        let header = output.rows[0].widgets()[0].as_text().unwrap();
        assert!(header.markdown.contains("[api]("));
        assert!(header.markdown.contains("#/clusters/main/services/api/details"));
        assert!(header.markdown.contains("Tasks: 2"));
    }

    #[test]
    fn test_hyphenated_names_do_not_collide() {
        let config = GlobalConfig::new("prod");
        let build_one = |cluster_name: &str, service_name: &str| {
            let resource = ResourceDescriptor::new(json!({
                "ResourceARN": format!("arn:aws:ecs:eu-west-1:123:cluster/{}", cluster_name),
                "services": [{
                    "serviceArn": format!(
                        "arn:aws:ecs:eu-west-1:123:service/{}/{}",
                        cluster_name, service_name
                    ),
                    "serviceName": service_name
                }]
            }));
            EcsServiceWidgetSet.build(&resource, &config).unwrap()
        };

        let first = build_one("shop-api", "worker");
        let second = build_one("shop", "api-worker");
        assert_ne!(first.alarms[0].name, second.alarms[0].name);
        assert_eq!(
            first.alarms[0].name,
            "CPUUtilisationAlarm-shop-api/worker-eu-west-1-prod"
        );
        assert_eq!(
            second.alarms[0].name,
            "CPUUtilisationAlarm-shop/api-worker-eu-west-1-prod"
        );
    }

    #[test]
    fn test_no_services() {
        let resource = ResourceDescriptor::new(json!({
            "ResourceARN": "arn:aws:ecs:eu-west-1:123:cluster/empty"
        }));
        let output = build(&resource);
        assert!(output.rows.is_empty());
        assert!(output.alarms.is_empty());
    }
}
