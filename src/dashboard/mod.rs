//! Read-only project overview assembled from the other collections.

pub mod data;
pub mod endpoints;
pub mod helpers;
