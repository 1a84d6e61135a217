//! Database models shared across the follow-up repository.

pub mod client;
pub mod comment;
pub mod config;
pub mod profile;
pub mod setting;

#[cfg(feature = "server")]
pub mod auth;
