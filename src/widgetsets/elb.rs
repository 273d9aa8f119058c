//! Pieces shared by the application and network load balancer widget sets

use super::console::{console_url, link};
use crate::cloudwatch::{
    alarm_name, AlarmDefinition, AlarmProps, Metric, Statistic, TreatMissingData, Unit,
    ONE_MINUTE,
};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::resource::{Arn, ResourceDescriptor};
use serde::Deserialize;

/// Unhealthy host alarm, one per target group
pub const UNHEALTHY_HOSTS_ALARM: AlarmProps =
    AlarmProps::new(3.0, 3, 3, TreatMissingData::NotBreaching);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetGroup {
    pub target_group_arn: String,
}

impl TargetGroup {
    /// `TargetGroup` dimension value: the last colon segment of the group ARN
    /// (`targetgroup/<name>/<id>`)
    pub fn dimension(&self) -> Result<&str> {
        Arn::parse(&self.target_group_arn)?.last_segment()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AvailabilityZone {
    pub zone_name: String,
}

/// Identity of a load balancer as the metric backend sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBalancer<'a> {
    pub name: &'a str,
    pub id: &'a str,
    pub region: &'a str,
    /// `LoadBalancer` dimension value: `<app|net>/<name>/<id>`
    pub dimension: String,
}

impl<'a> LoadBalancer<'a> {
    /// Identifier layout: `...:loadbalancer/<app|net>/<name>/<id>`. The name
    /// comes from `Extras.LoadBalancerName` when discovery recorded it.
    pub fn from_resource(resource: &'a ResourceDescriptor, prefix: &str) -> Result<Self> {
        let arn = Arn::parse(resource.arn()?)?;
        let region = arn.require_region()?;
        let id = arn.path_segment(3)?;
        let name = match resource.str_field("Extras.LoadBalancerName") {
            Some(name) => name,
            None => arn.path_segment(2)?,
        };

        Ok(Self {
            name,
            id,
            region,
            dimension: format!("{}/{}/{}", prefix, name, id),
        })
    }

    /// Header markdown with a link to the balancer in the EC2 console
    pub fn header(&self, label: &str, arn: &str) -> String {
        let url = console_url(
            self.region,
            "ec2",
            &format!("LoadBalancer:loadBalancerArn={}", arn),
        );
        format!("**ELB ({}) {}**", label, link(self.name, &url))
    }
}

/// `UnHealthyHostCount` for one target group
pub fn unhealthy_host_metric(
    namespace: &str,
    target_group: &str,
    load_balancer: &LoadBalancer<'_>,
) -> Metric {
    Metric::new(namespace, "UnHealthyHostCount")
        .dimension("TargetGroup", target_group)
        .dimension("LoadBalancer", &load_balancer.dimension)
        .statistic(Statistic::Maximum)
        .period(ONE_MINUTE)
        .unit(Unit::Count)
        .region(load_balancer.region)
}

pub fn unhealthy_host_alarm(
    prefix: &str,
    metric: Metric,
    target_group: &str,
    region: &str,
    config: &GlobalConfig,
) -> AlarmDefinition {
    AlarmDefinition::new(
        alarm_name(prefix, &[target_group, region], config),
        metric,
        UNHEALTHY_HOSTS_ALARM,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_from_extras() {
        let resource = ResourceDescriptor::new(json!({
            "ResourceARN": "arn:aws:elasticloadbalancing:eu-west-1:123:loadbalancer/app/web/50dc",
            "Extras": {"LoadBalancerName": "web-public"}
        }));
        let lb = LoadBalancer::from_resource(&resource, "app").unwrap();
        assert_eq!(lb.name, "web-public");
        assert_eq!(lb.id, "50dc");
        assert_eq!(lb.region, "eu-west-1");
        assert_eq!(lb.dimension, "app/web-public/50dc");
    }

    #[test]
    fn test_identity_falls_back_to_identifier_name() {
        let resource = ResourceDescriptor::new(json!({
            "ResourceARN": "arn:aws:elasticloadbalancing:eu-west-1:123:loadbalancer/net/edge/77aa"
        }));
        let lb = LoadBalancer::from_resource(&resource, "net").unwrap();
        assert_eq!(lb.dimension, "net/edge/77aa");
    }

    #[test]
    fn test_truncated_identifier_fails() {
        let resource = ResourceDescriptor::new(json!({
            "ResourceARN": "arn:aws:elasticloadbalancing:eu-west-1:123:loadbalancer/app/web"
        }));
        assert!(LoadBalancer::from_resource(&resource, "app").is_err());
    }

    #[test]
    fn test_target_group_dimension() {
        let tg = TargetGroup {
            target_group_arn: "arn:aws:elasticloadbalancing:eu-west-1:123:targetgroup/api/6d0e"
                .to_string(),
        };
        assert_eq!(tg.dimension().unwrap(), "targetgroup/api/6d0e");

        let broken = TargetGroup {
            target_group_arn: "targetgroup/api".to_string(),
        };
        assert!(broken.dimension().is_err());
    }
}
