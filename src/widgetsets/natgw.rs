//! NAT gateway widget set

use super::console::{console_url, link};
use super::{WidgetSet, WidgetSetOutput};
use crate::cloudwatch::{
    alarm_name, AlarmDefinition, AlarmProps, GraphWidget, Layout, Metric, Statistic, TextWidget,
    TreatMissingData, ONE_MINUTE,
};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::resource::{Arn, ResourceDescriptor};

const NAMESPACE: &str = "AWS/NATGateway";

const ERROR_ALARM: AlarmProps = AlarmProps::new(3.0, 3, 3, TreatMissingData::NotBreaching);

pub struct NatGatewayWidgetSet;

impl WidgetSet for NatGatewayWidgetSet {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn build(&self, resource: &ResourceDescriptor, config: &GlobalConfig) -> Result<WidgetSetOutput> {
        let arn = Arn::parse(resource.arn()?)?;
        let region = arn.require_region()?;
        let natgw_id = arn.last_path_segment()?;

        let mut layout = Layout::new();

        let url = console_url(
            region,
            "vpc",
            &format!("NatGatewayDetails:natGatewayId={}", natgw_id),
        );
        layout.add_row([
            TextWidget::header(format!("### NATGW {}", link(natgw_id, &url))).transparent(),
        ]);

        let metric = |name: &str| {
            Metric::new(NAMESPACE, name)
                .dimension("NatGatewayId", natgw_id)
                .statistic(Statistic::Sum)
                .period(ONE_MINUTE)
        };

        let port_allocation_errors = metric("ErrorPortAllocation");
        let packet_drops = metric("PacketsDropCount");

        let alarms = vec![
            AlarmDefinition::new(
                alarm_name("errorPortAlarm", &[natgw_id, region], config),
                port_allocation_errors.clone(),
                ERROR_ALARM,
            ),
            AlarmDefinition::new(
                alarm_name("packetDropAlarm", &[natgw_id, region], config),
                packet_drops.clone(),
                ERROR_ALARM,
            ),
        ];

        let graph = |title: &str| {
            GraphWidget::new(title)
                .period(ONE_MINUTE)
                .region(region)
                .width(6)
                .height(4)
        };

        layout.add_row([
            graph("Connections")
                .left([metric("ActiveConnectionCount").statistic(Statistic::Maximum)])
                .right([
                    metric("ConnectionAttemptCount"),
                    metric("ConnectionEstablishedCount"),
                ]),
            graph("Flows in bytes")
                .left([metric("BytesInFromSource"), metric("BytesOutToDestination")])
                .right([metric("BytesInFromDestination"), metric("BytesOutToSource")]),
            graph("Packet flows")
                .left([metric("PacketsInFromSource"), metric("PacketsOutToDestination")])
                .right([metric("PacketsInFromDestination"), metric("PacketsOutToSource")]),
            graph("Port alloc err/Pckt drop err")
                .left([port_allocation_errors])
                .right([packet_drops]),
        ]);

        Ok(WidgetSetOutput::new(layout, alarms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudwatch::widget::TextBackground;
    use crate::cloudwatch::GRID_WIDTH;
    use crate::error::Error;
    use serde_json::json;

    fn nat(arn: &str) -> ResourceDescriptor {
        ResourceDescriptor::new(json!({ "ResourceARN": arn }))
    }

    #[test]
    fn test_layout() {
        let output = NatGatewayWidgetSet
            .build(
                &nat("arn:aws:ec2:eu-west-1:123:natgateway/nat-0abc"),
                &GlobalConfig::new("prod"),
            )
            .unwrap();

        assert_eq!(output.rows.len(), 2);
        let header = output.rows[0].widgets()[0].as_text().unwrap();
        assert_eq!(header.background, TextBackground::Transparent);
        assert!(header.markdown.contains("natGatewayId=nat-0abc"));

        let row = &output.rows[1];
        assert_eq!(row.width(), GRID_WIDTH);
        assert!(row.widgets().iter().all(|w| w.height() == 4));

        let bytes = row.widgets()[1].as_graph().unwrap();
        assert_eq!(bytes.metric_count(), 4);
    }

    #[test]
    fn test_alarms() {
        let output = NatGatewayWidgetSet
            .build(
                &nat("arn:aws:ec2:eu-west-1:123:natgateway/nat-0abc"),
                &GlobalConfig::new("prod"),
            )
            .unwrap();
        let names: Vec<&str> = output.alarms.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "errorPortAlarm-nat-0abc-eu-west-1-prod",
                "packetDropAlarm-nat-0abc-eu-west-1-prod"
            ]
        );
        assert!(output
            .alarms
            .iter()
            .all(|a| a.threshold == 3.0 && a.treat_missing_data == TreatMissingData::NotBreaching));
    }

    #[test]
    fn test_identifier_without_id() {
        let result = NatGatewayWidgetSet.build(
            &nat("arn:aws:ec2:eu-west-1:123:natgateway"),
            &GlobalConfig::new("prod"),
        );
        assert!(matches!(result, Err(Error::MalformedIdentifier { .. })));
    }
}
