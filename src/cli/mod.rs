//! Terminal presentation of valuations.

pub mod setup;
pub mod show;
pub mod summary;
pub mod ui;
