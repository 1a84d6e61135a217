//! Domain aggregates exposed by the follow-up service layer.

pub mod client;
pub mod comment;
pub mod profile;
pub mod relance;
pub mod session;
pub mod types;
