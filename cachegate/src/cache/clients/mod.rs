//! Domain clients layered over the generic `Cache` trait.

mod response;

pub use response::{ResponseCacheClient, StoredResponse};
