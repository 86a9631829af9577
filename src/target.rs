//! Command targets: which organization and cluster (or cluster group) a command acts on.

use crate::error::CliError;

/// A single cluster of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterContext {
    pub organization_id: u32,
    pub cluster_id: u32,
}

impl ClusterContext {
    pub fn resolve(organization_id: Option<u32>, cluster_id: u32) -> Result<Self, CliError> {
        Ok(Self {
            organization_id: require_organization(organization_id)?,
            cluster_id,
        })
    }
}

/// A cluster group of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterGroupContext {
    pub organization_id: u32,
    pub cluster_group_id: u32,
}

impl ClusterGroupContext {
    pub fn resolve(organization_id: Option<u32>, cluster_group_id: u32) -> Result<Self, CliError> {
        Ok(Self {
            organization_id: require_organization(organization_id)?,
            cluster_group_id,
        })
    }
}

fn require_organization(organization_id: Option<u32>) -> Result<u32, CliError> {
    organization_id.ok_or_else(|| {
        CliError::Usage(
            "no organization selected; pass --organization or set PIPECTL_ORGANIZATION_ID"
                .to_string(),
        )
    })
}
