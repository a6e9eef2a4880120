pub mod checklist;
pub mod data;
pub mod endpoints;
pub mod helpers;
