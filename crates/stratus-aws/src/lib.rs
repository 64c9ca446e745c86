//! # stratus-aws
//!
//! Typed EC2 resource wrappers over the stratus-core provisioning context:
//! security groups with ingress rules, instances, and AMI lookup.

pub mod ec2;
