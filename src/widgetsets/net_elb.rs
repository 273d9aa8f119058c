//! Network load balancer widget set

use super::elb::{
    unhealthy_host_alarm, unhealthy_host_metric, AvailabilityZone, LoadBalancer, TargetGroup,
};
use super::{WidgetSet, WidgetSetOutput};
use crate::cloudwatch::{GraphWidget, Layout, Metric, Statistic, TextWidget, Unit, ONE_MINUTE};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::resource::ResourceDescriptor;

const NAMESPACE: &str = "AWS/NetworkELB";

pub struct NetworkElbWidgetSet;

impl WidgetSet for NetworkElbWidgetSet {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn build(&self, resource: &ResourceDescriptor, config: &GlobalConfig) -> Result<WidgetSetOutput> {
        let lb = LoadBalancer::from_resource(resource, "net")?;
        let target_groups: Vec<TargetGroup> = resource.list("TargetGroups")?;
        let zones: Vec<AvailabilityZone> = resource.list("Extras.AvailabilityZones")?;

        let mut layout = Layout::new();
        let mut alarms = Vec::new();

        layout.add_row([TextWidget::header(lb.header("NLB", resource.arn()?))]);

        let flow_metric = |name: &str, zone: &str| {
            Metric::new(NAMESPACE, name)
                .dimension("LoadBalancer", &lb.dimension)
                .dimension("AvailabilityZone", zone)
                .statistic(Statistic::Average)
                .period(ONE_MINUTE)
                .unit(Unit::Count)
                .region(lb.region)
        };

        let active_flows: Vec<Metric> = zones
            .iter()
            .map(|az| flow_metric("ActiveFlowCount", az.zone_name.as_str()))
            .collect();
        let new_flows: Vec<Metric> = zones
            .iter()
            .map(|az| flow_metric("NewFlowCount", az.zone_name.as_str()))
            .collect();

        let mut unhealthy_hosts = Vec::with_capacity(target_groups.len());
        for target_group in &target_groups {
            let tg = target_group.dimension()?;
            let unhealthy = unhealthy_host_metric(NAMESPACE, tg, &lb);
            alarms.push(unhealthy_host_alarm(
                "UHAlarm",
                unhealthy.clone(),
                tg,
                lb.region,
                config,
            ));
            unhealthy_hosts.push(unhealthy);
        }

        let metric = |name: &str, statistic: Statistic| {
            Metric::new(NAMESPACE, name)
                .dimension("LoadBalancer", &lb.dimension)
                .statistic(statistic)
                .period(ONE_MINUTE)
                .region(lb.region)
        };

        let graph = |title: &str| GraphWidget::new(title).region(lb.region).period(ONE_MINUTE);

        layout.add_row([
            graph("Active/New Flows")
                .left(active_flows)
                .right(new_flows)
                .width(10),
            graph("Unhealthy Hosts").left(unhealthy_hosts).width(4),
            graph("LCU / PeakBytesPerSecond")
                .left([metric("ConsumedLCUs", Statistic::Maximum)])
                .right([metric("PeakBytesPerSecond", Statistic::Maximum)])
                .width(10),
        ]);

        layout.add_row([
            graph("Processed Packets")
                .left([metric("ProcessedPackets", Statistic::Sum)])
                .width(6),
            graph("RST client")
                .left([metric("TCP_Client_Reset_Count", Statistic::Sum)])
                .width(6),
            graph("RST ELB")
                .left([metric("TCP_ELB_Reset_Count", Statistic::Sum)])
                .width(6),
            graph("RST Target")
                .left([metric("TCP_Target_Reset_Count", Statistic::Sum)])
                .width(6),
        ]);

        Ok(WidgetSetOutput::new(layout, alarms))
    }
}
