//! AMI lookup
//!
//! Resolved through the backend's provider-call path; under a mock backend
//! the result mirrors whatever the monitor was seeded with (or, by default,
//! the lookup arguments themselves).

use serde::{Deserialize, Serialize};
use stratus_core::{from_property_map, to_property_map};
use stratus_core::{Context, Result};

/// Function token for AMI lookup
pub const GET_AMI_TOKEN: &str = "aws:ec2/getAmi:getAmi";

/// A single lookup filter (e.g. `name` matching a pattern)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAmiFilter {
    /// Filter field name
    pub name: String,
    /// Accepted values or patterns
    pub values: Vec<String>,
}

/// AMI lookup arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAmiArgs {
    /// Lookup filters
    pub filters: Vec<GetAmiFilter>,
    /// Image owner account identifiers
    pub owners: Vec<String>,
    /// Select the most recently created match
    pub most_recent: bool,
}

/// A resolved machine image.
///
/// Every field defaults so an echo-style mock that returns the lookup
/// arguments unchanged still deserializes; tests needing a realistic image
/// identifier seed the call instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAmiResult {
    /// Image identifier
    pub id: String,
    /// Image name
    pub name: String,
    /// Owning account identifier
    pub owner_id: String,
}

/// Look up a machine image by filter, owner, and recency
pub async fn get_ami(ctx: &Context, args: GetAmiArgs) -> Result<GetAmiResult> {
    let result = ctx.invoke(GET_AMI_TOKEN, to_property_map(&args)?).await?;
    from_property_map(&result)
}
