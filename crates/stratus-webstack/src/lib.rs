//! # stratus-webstack
//!
//! A minimal web-serving stack: one security group admitting HTTP from
//! anywhere, and one EC2 instance running the most recent Ubuntu bionic
//! image inside that group. The integration tests validate the stack's
//! policy invariants against a mocked backend; see `tests/stack_tests.rs`.

use anyhow::{Context as _, Result};
use std::collections::HashMap;
use stratus_aws::ec2::{
    get_ami, GetAmiArgs, GetAmiFilter, IngressRuleArgs, Instance, InstanceArgs, SecurityGroup,
    SecurityGroupArgs, UNRESTRICTED_V4,
};
use stratus_core::{Context, Input};

/// Name pattern of the Ubuntu bionic server images the stack runs
pub const UBUNTU_BIONIC_PATTERN: &str =
    "ubuntu/images/hvm-ssd/ubuntu-bionic-18.04-amd64-server-*";

/// Canonical's AWS account id, the image owner filtered on
pub const CANONICAL_OWNER_ID: &str = "137112412989";

/// Handles to the declared stack.
///
/// The declaration function owns these; harnesses borrow them read-only to
/// inspect resolved output values.
#[derive(Debug)]
pub struct Infrastructure {
    /// The web tier security group
    pub group: SecurityGroup,
    /// The web server instance
    pub server: Instance,
}

/// Declare the web stack against the provisioning context.
///
/// The instance joins the group by its resolved identifier, so its
/// registration waits for the group's to complete; the image comes from a
/// most-recent AMI lookup.
pub async fn create_infrastructure(ctx: &Context) -> Result<Infrastructure> {
    let group = SecurityGroup::create(
        ctx,
        "web-secgrp",
        SecurityGroupArgs {
            description: None,
            ingress: vec![IngressRuleArgs {
                protocol: "tcp".into(),
                from_port: 80.into(),
                to_port: 80.into(),
                cidr_blocks: vec![UNRESTRICTED_V4.into()],
            }],
        },
    )
    .await
    .context("creating web security group")?;

    let ami = get_ami(
        ctx,
        GetAmiArgs {
            filters: vec![GetAmiFilter {
                name: "name".to_string(),
                values: vec![UBUNTU_BIONIC_PATTERN.to_string()],
            }],
            owners: vec![CANONICAL_OWNER_ID.to_string()],
            most_recent: true,
        },
    )
    .await
    .context("looking up base image")?;

    let server = Instance::create(
        ctx,
        "web-server-www",
        InstanceArgs {
            ami: ami.id.into(),
            instance_type: "t2.micro".into(),
            vpc_security_group_ids: vec![group.id.clone().into()],
            tags: Some(HashMap::from([(
                "Name".to_string(),
                Input::from("webserver"),
            )])),
        },
    )
    .await
    .context("creating web server instance")?;

    Ok(Infrastructure { group, server })
}
