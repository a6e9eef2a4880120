//! Email and password identity with bearer-token sessions. Roles are only
//! reported back to the client; no route checks them.

pub mod data;
pub mod endpoints;
pub mod guard;
pub mod helpers;
