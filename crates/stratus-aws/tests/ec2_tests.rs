//! Behavior tests for the EC2 resource wrappers against the mock monitor.
//!
//! Every external collaborator is mocked: registrations receive synthesized
//! identifiers, state is the echoed inputs, and AMI lookups resolve to seeded
//! or echoed data. Tests assert on the interactions between the wrappers and
//! the backend, not on any real cloud behavior.
//!
//! # Test organization
//!
//! 1. Security group creation and state echo
//! 2. Instance creation and the security-group dependency edge
//! 3. AMI lookup (echo default, seeded override)
//! 4. Declaration-time rejection

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use stratus_aws::ec2::{
    get_ami, GetAmiArgs, GetAmiFilter, IngressRuleArgs, Instance, InstanceArgs, SecurityGroup,
    SecurityGroupArgs, GET_AMI_TOKEN, INSTANCE_TOKEN, SECURITY_GROUP_TOKEN, UNRESTRICTED_V4,
};
use stratus_core::{Context, Input, PropertyMap, RunSettings};
use stratus_testing::MockBackend;

fn mocked_context() -> (Arc<MockBackend>, Context) {
    let mock = Arc::new(MockBackend::new());
    let ctx = Context::new(RunSettings::default(), mock.clone());
    (mock, ctx)
}

fn http_ingress() -> IngressRuleArgs {
    IngressRuleArgs {
        protocol: "tcp".into(),
        from_port: 80.into(),
        to_port: 80.into(),
        cidr_blocks: vec![UNRESTRICTED_V4.into()],
    }
}

#[tokio::test]
async fn security_group_registers_and_exposes_echoed_ingress() {
    let (mock, ctx) = mocked_context();

    let group = SecurityGroup::create(
        &ctx,
        "web-secgrp",
        SecurityGroupArgs {
            description: Some("web tier".into()),
            ingress: vec![http_ingress()],
        },
    )
    .await
    .unwrap();

    assert_eq!(group.name, "web-secgrp");
    assert_eq!(group.id.get().await.unwrap(), "web-secgrp-id");

    let rules = group.ingress.get().await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].protocol, "tcp");
    assert_eq!(rules[0].from_port, 80);
    assert_eq!(rules[0].cidr_blocks, vec![UNRESTRICTED_V4.to_string()]);

    let records = mock.resource_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].type_token, SECURITY_GROUP_TOKEN);
    assert_eq!(records[0].inputs["description"], "web tier");
}

#[tokio::test]
async fn instance_waits_for_the_group_identifier() {
    let (mock, ctx) = mocked_context();

    let group = SecurityGroup::create(
        &ctx,
        "web-secgrp",
        SecurityGroupArgs {
            description: None,
            ingress: vec![http_ingress()],
        },
    )
    .await
    .unwrap();

    let server = Instance::create(
        &ctx,
        "web-server-www",
        InstanceArgs {
            ami: "ami-1234".into(),
            instance_type: "t2.micro".into(),
            // Membership by the group's resolved identifier, so creation
            // waits for the group.
            vpc_security_group_ids: vec![group.id.clone().into()],
            tags: Some(HashMap::from([(
                "Name".to_string(),
                Input::from("webserver"),
            )])),
        },
    )
    .await
    .unwrap();

    assert_eq!(server.id.get().await.unwrap(), "web-server-www-id");

    let tags = server.tags.get().await.unwrap().unwrap();
    assert_eq!(tags["Name"], "webserver");

    let records = mock.resource_records();
    let instance = records
        .iter()
        .find(|r| r.type_token == INSTANCE_TOKEN)
        .unwrap();
    assert_eq!(
        instance.inputs["vpcSecurityGroupIds"],
        json!(["web-secgrp-id"])
    );
}

#[tokio::test]
async fn ami_lookup_echoes_arguments_by_default() {
    let (mock, ctx) = mocked_context();

    let result = get_ami(
        &ctx,
        GetAmiArgs {
            filters: vec![GetAmiFilter {
                name: "name".to_string(),
                values: vec!["ubuntu/*".to_string()],
            }],
            owners: vec!["137112412989".to_string()],
            most_recent: true,
        },
    )
    .await
    .unwrap();

    // Echo carries no image id; defaulted fields keep deserialization alive.
    assert_eq!(result.id, "");
    assert!(mock.was_called(GET_AMI_TOKEN));

    let calls = mock.call_records();
    assert_eq!(calls[0].args["owners"], json!(["137112412989"]));
    assert_eq!(calls[0].args["mostRecent"], json!(true));
}

#[tokio::test]
async fn seeded_ami_lookup_resolves_a_realistic_image() {
    let (mock, ctx) = mocked_context();
    let mut seeded = PropertyMap::new();
    seeded.insert("id".to_string(), json!("ami-0bionic"));
    seeded.insert("ownerId".to_string(), json!("137112412989"));
    mock.seed_call(GET_AMI_TOKEN, seeded);

    let result = get_ami(
        &ctx,
        GetAmiArgs {
            filters: vec![],
            owners: vec!["137112412989".to_string()],
            most_recent: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(result.id, "ami-0bionic");
    assert_eq!(result.owner_id, "137112412989");
}

#[tokio::test]
async fn backend_rejection_aborts_creation() {
    let (mock, ctx) = mocked_context();
    mock.fail_resource("web-secgrp", "quota exceeded");

    let err = SecurityGroup::create(
        &ctx,
        "web-secgrp",
        SecurityGroupArgs {
            description: None,
            ingress: vec![http_ingress()],
        },
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("quota exceeded"));
    assert!(!mock.was_registered("web-secgrp"));
}
