//! Key-value documents: the server-side home of what the browser used to
//! keep in local storage. Writes publish `Change::Key` so listeners reload
//! exactly the key they watch.

pub mod endpoints;
pub mod helpers;
