//! Widget sets
//!
//! One widget set per resource kind. Each turns a single resource descriptor
//! into a header row, one or more metric rows and the alarms that go with
//! them. Widget sets never see each other's output; the dispatcher
//! concatenates results.
//!
//! # Module Structure
//!
//! - [`apigateway`] - REST API gateways (optional cache widget)
//! - [`app_elb`] - Application load balancers (per target group fan-out)
//! - [`net_elb`] - Network load balancers (per zone and target group fan-out)
//! - [`natgw`] - NAT gateways
//! - [`ecs`] - ECS services (per service fan-out within a cluster)
//! - [`lambda`] - Lambda functions
//! - [`s3`] - S3 buckets

pub mod apigateway;
pub mod app_elb;
mod console;
mod elb;
pub mod ecs;
pub mod lambda;
pub mod natgw;
pub mod net_elb;
pub mod s3;

use crate::cloudwatch::{AlarmDefinition, Layout, Row};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::resource::{ResourceDescriptor, ResourceKind};

/// Rows and alarms produced for one resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetSetOutput {
    pub rows: Vec<Row>,
    pub alarms: Vec<AlarmDefinition>,
}

impl WidgetSetOutput {
    pub fn new(layout: Layout, alarms: Vec<AlarmDefinition>) -> Self {
        Self {
            rows: layout.into_rows(),
            alarms,
        }
    }

    /// Append another output after this one
    pub fn extend(&mut self, other: WidgetSetOutput) {
        self.rows.extend(other.rows);
        self.alarms.extend(other.alarms);
    }
}

/// Common contract of every widget set
pub trait WidgetSet: Sync {
    /// Metric namespace the widget set reads from
    fn namespace(&self) -> &'static str;

    fn build(&self, resource: &ResourceDescriptor, config: &GlobalConfig)
        -> Result<WidgetSetOutput>;
}

/// Widget set for a kind
pub fn widget_set_for(kind: ResourceKind) -> &'static dyn WidgetSet {
    match kind {
        ResourceKind::ApiGateway => &apigateway::ApiGatewayWidgetSet,
        ResourceKind::ApplicationLoadBalancer => &app_elb::ApplicationElbWidgetSet,
        ResourceKind::NetworkLoadBalancer => &net_elb::NetworkElbWidgetSet,
        ResourceKind::NatGateway => &natgw::NatGatewayWidgetSet,
        ResourceKind::EcsCluster => &ecs::EcsServiceWidgetSet,
        ResourceKind::LambdaFunction => &lambda::LambdaWidgetSet,
        ResourceKind::S3Bucket => &s3::S3WidgetSet,
    }
}
