//! Kind Registry - Load identifier matching rules from JSON
//!
//! This module loads the rules that map a resource identifier to a
//! [`ResourceKind`] from an embedded JSON file and provides lookup functions
//! for the dispatcher.

use serde::Deserialize;
use std::sync::OnceLock;

/// Embedded kind rules (compiled into the binary)
const KINDS_FILE: &str = include_str!("../resources/kinds.json");

/// Resource kinds this engine visualizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    ApiGateway,
    ApplicationLoadBalancer,
    NetworkLoadBalancer,
    NatGateway,
    EcsCluster,
    LambdaFunction,
    S3Bucket,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        Self::ApiGateway,
        Self::ApplicationLoadBalancer,
        Self::NetworkLoadBalancer,
        Self::NatGateway,
        Self::EcsCluster,
        Self::LambdaFunction,
        Self::S3Bucket,
    ];

    /// Parse an explicit kind tag (`"lambda_function"`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiGateway => "api_gateway",
            Self::ApplicationLoadBalancer => "application_load_balancer",
            Self::NetworkLoadBalancer => "network_load_balancer",
            Self::NatGateway => "nat_gateway",
            Self::EcsCluster => "ecs_cluster",
            Self::LambdaFunction => "lambda_function",
            Self::S3Bucket => "s3_bucket",
        }
    }

    /// Human readable name from the registry, falling back to the tag
    pub fn display_name(&self) -> &'static str {
        get_kind_def(*self)
            .map(|def| def.display_name.as_str())
            .unwrap_or_else(|| self.as_str())
    }
}

/// Identifier matching rule from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct KindDef {
    pub kind: ResourceKind,
    pub display_name: String,
    /// Identifier must contain every one of these
    pub all_of: Vec<String>,
    /// Identifier must contain at least one of these (ignored when empty)
    #[serde(default)]
    pub any_of: Vec<String>,
    /// Identifier must contain none of these
    #[serde(default)]
    pub none_of: Vec<String>,
}

impl KindDef {
    pub fn matches(&self, identifier: &str) -> bool {
        self.all_of.iter().all(|s| identifier.contains(s.as_str()))
            && (self.any_of.is_empty()
                || self.any_of.iter().any(|s| identifier.contains(s.as_str())))
            && !self.none_of.iter().any(|s| identifier.contains(s.as_str()))
    }
}

/// Root structure of resources/kinds.json
#[derive(Debug, Clone, Deserialize)]
pub struct KindRegistry {
    /// Checked in file order; first match wins
    pub kinds: Vec<KindDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<KindRegistry> = OnceLock::new();

/// Get the kind registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static KindRegistry {
    REGISTRY.get_or_init(|| {
        serde_json::from_str(KINDS_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded kinds JSON: {}", e))
    })
}

/// Get the matching rule for a kind
pub fn get_kind_def(kind: ResourceKind) -> Option<&'static KindDef> {
    get_registry().kinds.iter().find(|def| def.kind == kind)
}

/// Resolve a kind from an identifier string
pub fn classify(identifier: &str) -> Option<ResourceKind> {
    get_registry()
        .kinds
        .iter()
        .find(|def| def.matches(identifier))
        .map(|def| def.kind)
}
