//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for reads that may include unpublished rows
/// (`?include_drafts=true`). Only honoured for authenticated admins.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeDraftsParams {
    #[serde(default)]
    pub include_drafts: bool,
}
