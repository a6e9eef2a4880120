pub mod board;
pub mod data;
pub mod endpoints;
pub mod helpers;
