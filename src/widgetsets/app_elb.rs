//! Application load balancer widget set

use super::elb::{unhealthy_host_alarm, unhealthy_host_metric, LoadBalancer, TargetGroup};
use super::{WidgetSet, WidgetSetOutput};
use crate::cloudwatch::{
    alarm_name, AlarmDefinition, AlarmProps, GraphWidget, Layout, Metric, Statistic, TextWidget,
    TreatMissingData, Unit, ONE_MINUTE,
};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::resource::ResourceDescriptor;

const NAMESPACE: &str = "AWS/ApplicationELB";

const HTTP_5XX_ALARM: AlarmProps = AlarmProps::new(2.0, 2, 2, TreatMissingData::NotBreaching);

pub struct ApplicationElbWidgetSet;

impl WidgetSet for ApplicationElbWidgetSet {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn build(&self, resource: &ResourceDescriptor, config: &GlobalConfig) -> Result<WidgetSetOutput> {
        let lb = LoadBalancer::from_resource(resource, "app")?;
        let target_groups: Vec<TargetGroup> = resource.list("TargetGroups")?;

        let mut layout = Layout::new();
        let mut alarms = Vec::new();

        layout.add_row([TextWidget::header(lb.header("ALB", resource.arn()?))]);

        let metric = |name: &str, period: u32| {
            Metric::new(NAMESPACE, name)
                .dimension("LoadBalancer", &lb.dimension)
                .statistic(Statistic::Sum)
                .period(period)
                .region(lb.region)
        };

        let active_connections = metric("ActiveConnectionCount", 1).unit(Unit::Count);
        let new_connections = metric("NewConnectionCount", 1).unit(Unit::Count);
        let consumed_lcus = metric("ConsumedLCUs", 1).unit(Unit::Count);
        let fixed_responses = metric("HTTP_Fixed_Response_Count", 1).unit(Unit::Count);
        let redirects = metric("HTTP_Redirect_Count", 1).unit(Unit::Count);
        let elb_5xx = metric("HTTPCode_ELB_5XX_Count", ONE_MINUTE);
        let backend_5xx = metric("HTTPCode_Target_5XX_Count", ONE_MINUTE);
        let rejected_connections = metric("RejectedConnectionCount", ONE_MINUTE);

        let mut unhealthy_hosts = Vec::with_capacity(target_groups.len());
        let mut response_times = Vec::with_capacity(target_groups.len());
        for target_group in &target_groups {
            let tg = target_group.dimension()?;
            let unhealthy = unhealthy_host_metric(NAMESPACE, tg, &lb);

            response_times.push(
                Metric::new(NAMESPACE, "TargetResponseTime")
                    .dimension("TargetGroup", tg)
                    .dimension("LoadBalancer", &lb.dimension)
                    .statistic(Statistic::Average)
                    .period(ONE_MINUTE)
                    .unit(Unit::Count)
                    .region(lb.region),
            );
            alarms.push(unhealthy_host_alarm(
                "Unhealthy-Hosts-Alarm",
                unhealthy.clone(),
                tg,
                lb.region,
                config,
            ));
            unhealthy_hosts.push(unhealthy);
        }

        alarms.push(AlarmDefinition::new(
            alarm_name("5xxAlarm", &[lb.name, lb.id, lb.region], config),
            elb_5xx.clone(),
            HTTP_5XX_ALARM,
        ));
        alarms.push(AlarmDefinition::new(
            alarm_name("Backend5xxAlarm", &[lb.name, lb.id, lb.region], config),
            backend_5xx.clone(),
            HTTP_5XX_ALARM,
        ));

        layout.add_row([
            GraphWidget::new("Active/New Conns")
                .region(lb.region)
                .left([active_connections])
                .right([new_connections])
                .period(1)
                .width(10),
            GraphWidget::new("Consumed LCUs")
                .region(lb.region)
                .left([consumed_lcus])
                .period(ONE_MINUTE)
                .width(4),
            GraphWidget::new("Fixed Response/Redirect count")
                .region(lb.region)
                .left([fixed_responses])
                .right([redirects])
                .period(1)
                .width(10),
        ]);

        layout.add_row([
            GraphWidget::new("Rejected Connections / Target Response Time")
                .region(lb.region)
                .left([rejected_connections])
                .right(response_times)
                .period(ONE_MINUTE)
                .width(10),
            GraphWidget::new("Unhealthy Hosts")
                .region(lb.region)
                .left(unhealthy_hosts)
                .period(ONE_MINUTE)
                .width(4),
            GraphWidget::new("Errors")
                .region(lb.region)
                .left([elb_5xx])
                .right([backend_5xx])
                .period(1)
                .width(10),
        ]);

        Ok(WidgetSetOutput::new(layout, alarms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudwatch::GRID_WIDTH;
    use serde_json::{json, Value};

    const ARN: &str =
        "arn:aws:elasticloadbalancing:eu-west-1:123456789012:loadbalancer/app/web/50dc6c495c0c9188";

    fn alb(target_groups: Value) -> ResourceDescriptor {
        ResourceDescriptor::new(json!({
            "ResourceARN": ARN,
            "Extras": {"LoadBalancerName": "web", "Type": "application"},
            "TargetGroups": target_groups
        }))
    }

    fn target_groups(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| {
                    json!({
                        "TargetGroupArn": format!(
                            "arn:aws:elasticloadbalancing:eu-west-1:123456789012:targetgroup/tg-{}/{:04x}",
                            i, i
                        )
                    })
                })
                .collect(),
        )
    }

    fn build(resource: &ResourceDescriptor) -> WidgetSetOutput {
        ApplicationElbWidgetSet
            .build(resource, &GlobalConfig::new("prod"))
            .unwrap()
    }

    #[test]
    fn test_rows_fill_the_grid() {
        let output = build(&alb(target_groups(2)));
        assert_eq!(output.rows.len(), 3);
        for row in &output.rows {
            assert_eq!(row.width(), GRID_WIDTH);
        }
    }

    #[test]
    fn test_alarms_per_target_group() {
        let output = build(&alb(target_groups(2)));
        assert_eq!(output.alarms.len(), 4);

        let unhealthy: Vec<_> = output
            .alarms
            .iter()
            .filter(|a| a.name.starts_with("Unhealthy-Hosts-Alarm"))
            .collect();
        assert_eq!(unhealthy.len(), 2);
        assert_eq!(
            unhealthy[0].name,
            "Unhealthy-Hosts-Alarm-targetgroup/tg-0/0000-eu-west-1-prod"
        );
        assert_eq!(unhealthy[0].threshold, 3.0);
        assert_eq!(unhealthy[0].evaluation_periods, 3);

        let elb_5xx = output
            .alarms
            .iter()
            .find(|a| a.name.starts_with("5xxAlarm"))
            .unwrap();
        assert_eq!(elb_5xx.name, "5xxAlarm-web-50dc6c495c0c9188-eu-west-1-prod");
        assert_eq!(elb_5xx.threshold, 2.0);
        assert_eq!(elb_5xx.datapoints_to_alarm, 2);
    }

    #[test]
    fn test_no_target_groups() {
        let resource = ResourceDescriptor::new(json!({"ResourceARN": ARN}));
        let output = build(&resource);
        assert_eq!(output.rows.len(), 3);
        assert_eq!(output.alarms.len(), 2);

        let unhealthy = output.rows[2].widgets()[1].as_graph().unwrap();
        assert!(unhealthy.left.is_empty());
    }

    #[test]
    fn test_fan_out_metrics() {
        let output = build(&alb(target_groups(3)));
        let row = &output.rows[2];
        let response = row.widgets()[0].as_graph().unwrap();
        assert_eq!(response.right.len(), 3);
        let unhealthy = row.widgets()[1].as_graph().unwrap();
        assert_eq!(unhealthy.left.len(), 3);

        let metric = unhealthy.left[1].as_metric().unwrap();
        assert_eq!(metric.dimensions["LoadBalancer"], "app/web/50dc6c495c0c9188");
        assert_eq!(metric.dimensions["TargetGroup"], "targetgroup/tg-1/0001");
        assert_eq!(metric.statistic, Statistic::Maximum);
    }

    #[test]
    fn test_header() {
        let output = build(&alb(target_groups(0)));
        let header = output.rows[0].widgets()[0].as_text().unwrap();
        assert!(header.markdown.starts_with("**ELB (ALB) [web]("));
        assert!(header.markdown.contains("eu-west-1.console.aws.amazon.com/ec2"));
    }

    #[test]
    fn test_malformed_target_group_fails() {
        let output = ApplicationElbWidgetSet.build(
            &alb(json!([{"TargetGroupArn": "bogus"}])),
            &GlobalConfig::new("prod"),
        );
        assert!(output.is_err());
    }
}
