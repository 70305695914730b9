//! Request and response values exchanged between the arbiter, the cache
//! and the network.

mod request;
mod response;

pub use request::{is_same_origin, Request};
pub use response::{Response, ResponseType};
