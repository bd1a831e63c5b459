pub mod auth;
pub mod directory;
pub mod profile;
pub mod resource;
pub mod session;
pub mod upload;
