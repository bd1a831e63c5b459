//! Authentication extractors.
//!
//! - [`auth::SessionToken`] -- valid bearer token bound to a live session row.
//! - [`auth::AuthAdmin`] -- supervised session; the request counts as activity.
//! - [`auth::PassiveAuthAdmin`] -- supervised session; activity is not recorded.
//! - [`auth::DraftAccess`] -- `include_drafts` flag, checked passively against the token.

pub mod auth;
