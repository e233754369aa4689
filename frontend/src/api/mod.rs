mod attendance;
mod auth;
pub mod client;
mod field_trips;
mod notifications;
pub mod types;

pub use client::*;
pub use types::*;
