//! EC2 resource declarations

mod ami;
mod instance;
mod security_group;

pub use ami::{get_ami, GetAmiArgs, GetAmiFilter, GetAmiResult, GET_AMI_TOKEN};
pub use instance::{Instance, InstanceArgs, INSTANCE_TOKEN};
pub use security_group::{
    IngressRule, IngressRuleArgs, SecurityGroup, SecurityGroupArgs, SECURITY_GROUP_TOKEN,
    UNRESTRICTED_V4, UNRESTRICTED_V6,
};
