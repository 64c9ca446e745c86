//! EC2 instance resource

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stratus_core::{from_property_map, to_property_map};
use stratus_core::{Context, Input, Output, Result};

/// Resource type token for EC2 instances
pub const INSTANCE_TOKEN: &str = "aws:ec2/instance:Instance";

/// Instance arguments
#[derive(Debug, Clone)]
pub struct InstanceArgs {
    /// Machine image identifier
    pub ami: Input<String>,
    /// Instance size class (e.g. `t2.micro`)
    pub instance_type: Input<String>,
    /// Security groups the instance belongs to, by identifier.
    ///
    /// Passing a group's `id` output establishes the dependency edge:
    /// registration waits until the identifier has resolved.
    pub vpc_security_group_ids: Vec<Input<String>>,
    /// Labels applied to the instance
    pub tags: Option<HashMap<String, Input<String>>>,
}

/// Wire form of the instance's input properties and resolved state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InstanceState {
    ami: String,
    instance_type: String,
    vpc_security_group_ids: Vec<String>,
    tags: Option<HashMap<String, String>>,
}

/// An EC2 instance
///
/// Desired invariant (validated by test harnesses, not enforced here): the
/// tag mapping carries a `Name` key.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Logical name the instance was registered under
    pub name: String,
    /// Assigned instance identifier
    pub id: Output<String>,
    /// Resolved tag mapping
    pub tags: Output<Option<HashMap<String, String>>>,
}

impl Instance {
    /// Declare an instance against the provisioning context.
    ///
    /// All inputs are resolved (awaiting upstream outputs such as a security
    /// group's identifier) before the creation intent is submitted.
    pub async fn create(ctx: &Context, name: &str, args: InstanceArgs) -> Result<Self> {
        let mut vpc_security_group_ids = Vec::with_capacity(args.vpc_security_group_ids.len());
        for id in &args.vpc_security_group_ids {
            vpc_security_group_ids.push(id.resolve().await?);
        }

        let tags = match &args.tags {
            Some(tags) => {
                let mut resolved = HashMap::with_capacity(tags.len());
                for (key, value) in tags {
                    resolved.insert(key.clone(), value.resolve().await?);
                }
                Some(resolved)
            }
            None => None,
        };

        let inputs = to_property_map(&InstanceState {
            ami: args.ami.resolve().await?,
            instance_type: args.instance_type.resolve().await?,
            vpc_security_group_ids,
            tags,
        })?;

        let resource = ctx.register_resource(INSTANCE_TOKEN, name, inputs).await?;

        let tags = resource.state.try_map(|state| {
            let parsed: InstanceState = from_property_map(&state)?;
            Ok(parsed.tags)
        });

        Ok(Self {
            name: resource.name,
            id: resource.id,
            tags,
        })
    }
}
