//! EC2 security group resource

use serde::{Deserialize, Serialize};
use stratus_core::{from_property_map, to_property_map};
use stratus_core::{Context, Input, Output, Result};

/// Resource type token for EC2 security groups
pub const SECURITY_GROUP_TOKEN: &str = "aws:ec2/securityGroup:SecurityGroup";

/// The unrestricted IPv4 source range
pub const UNRESTRICTED_V4: &str = "0.0.0.0/0";

/// The unrestricted IPv6 source range
pub const UNRESTRICTED_V6: &str = "::/0";

/// Ingress rule arguments
#[derive(Debug, Clone)]
pub struct IngressRuleArgs {
    /// Protocol (`tcp`, `udp`, `icmp`, `ssh`, or `-1` for all traffic)
    pub protocol: Input<String>,
    /// Start of the allowed port range (inclusive)
    pub from_port: Input<i64>,
    /// End of the allowed port range (inclusive)
    pub to_port: Input<i64>,
    /// Source address ranges in CIDR notation
    pub cidr_blocks: Vec<Input<String>>,
}

/// Security group arguments
#[derive(Debug, Clone, Default)]
pub struct SecurityGroupArgs {
    /// Group description
    pub description: Option<Input<String>>,
    /// Ingress rules
    pub ingress: Vec<IngressRuleArgs>,
}

/// A resolved ingress rule, as echoed back in resource state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    /// Protocol
    pub protocol: String,
    /// Start of the allowed port range (inclusive)
    pub from_port: i64,
    /// End of the allowed port range (inclusive)
    pub to_port: i64,
    /// Source address ranges in CIDR notation
    #[serde(default)]
    pub cidr_blocks: Vec<String>,
}

impl IngressRule {
    /// Whether this rule admits traffic on `port` at all.
    ///
    /// The `ssh` protocol label and the all-traffic protocols (`-1`, `all`)
    /// admit regardless of the declared port range.
    fn covers_port(&self, port: i64) -> bool {
        match self.protocol.as_str() {
            "ssh" => port == 22,
            "-1" | "all" => true,
            _ => self.from_port <= port && port <= self.to_port,
        }
    }

    /// Whether any source range is unrestricted
    fn unrestricted(&self) -> bool {
        self.cidr_blocks
            .iter()
            .any(|cidr| cidr == UNRESTRICTED_V4 || cidr == UNRESTRICTED_V6)
    }

    /// True when the rule both covers `port` and admits the whole internet
    pub fn opens_port_to_world(&self, port: i64) -> bool {
        self.covers_port(port) && self.unrestricted()
    }
}

/// Wire form of the group's input properties and resolved state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SecurityGroupState {
    description: Option<String>,
    ingress: Vec<IngressRule>,
}

/// An EC2 security group
///
/// Desired invariant (validated by test harnesses, not enforced here): no
/// ingress rule opens an administrative port to the unrestricted range.
#[derive(Debug, Clone)]
pub struct SecurityGroup {
    /// Logical name the group was registered under
    pub name: String,
    /// Assigned group identifier
    pub id: Output<String>,
    /// Resolved ingress rules
    pub ingress: Output<Vec<IngressRule>>,
}

impl SecurityGroup {
    /// Declare a security group against the provisioning context.
    ///
    /// All inputs are resolved (awaiting upstream outputs) before the
    /// creation intent is submitted.
    pub async fn create(ctx: &Context, name: &str, args: SecurityGroupArgs) -> Result<Self> {
        let mut ingress = Vec::with_capacity(args.ingress.len());
        for rule in &args.ingress {
            let mut cidr_blocks = Vec::with_capacity(rule.cidr_blocks.len());
            for cidr in &rule.cidr_blocks {
                cidr_blocks.push(cidr.resolve().await?);
            }
            ingress.push(IngressRule {
                protocol: rule.protocol.resolve().await?,
                from_port: rule.from_port.resolve().await?,
                to_port: rule.to_port.resolve().await?,
                cidr_blocks,
            });
        }

        let description = match &args.description {
            Some(description) => Some(description.resolve().await?),
            None => None,
        };

        let inputs = to_property_map(&SecurityGroupState {
            description,
            ingress,
        })?;

        let resource = ctx
            .register_resource(SECURITY_GROUP_TOKEN, name, inputs)
            .await?;

        let ingress = resource.state.try_map(|state| {
            let parsed: SecurityGroupState = from_property_map(&state)?;
            Ok(parsed.ingress)
        });

        Ok(Self {
            name: resource.name,
            id: resource.id,
            ingress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(protocol: &str, from: i64, to: i64, cidrs: &[&str]) -> IngressRule {
        IngressRule {
            protocol: protocol.to_string(),
            from_port: from,
            to_port: to,
            cidr_blocks: cidrs.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn exact_port_open_to_world_is_flagged() {
        assert!(rule("tcp", 22, 22, &[UNRESTRICTED_V4]).opens_port_to_world(22));
    }

    #[test]
    fn range_spanning_the_port_is_flagged() {
        assert!(rule("tcp", 0, 1024, &[UNRESTRICTED_V4]).opens_port_to_world(22));
    }

    #[test]
    fn all_traffic_protocol_is_flagged() {
        assert!(rule("-1", 0, 0, &[UNRESTRICTED_V4]).opens_port_to_world(22));
        assert!(rule("all", 0, 0, &[UNRESTRICTED_V6]).opens_port_to_world(22));
    }

    #[test]
    fn ssh_protocol_label_is_flagged() {
        assert!(rule("ssh", 0, 0, &[UNRESTRICTED_V4]).opens_port_to_world(22));
    }

    #[test]
    fn other_ports_open_to_world_pass() {
        assert!(!rule("tcp", 80, 80, &[UNRESTRICTED_V4]).opens_port_to_world(22));
        assert!(!rule("tcp", 443, 443, &[UNRESTRICTED_V6]).opens_port_to_world(22));
    }

    #[test]
    fn restricted_sources_pass_even_on_port_22() {
        assert!(!rule("tcp", 22, 22, &["10.0.0.0/8"]).opens_port_to_world(22));
        assert!(!rule("tcp", 22, 22, &[]).opens_port_to_world(22));
    }

    #[test]
    fn ipv6_unrestricted_counts_as_world() {
        assert!(rule("tcp", 22, 22, &[UNRESTRICTED_V6]).opens_port_to_world(22));
    }
}
