//! Mock HR backend
//!
//! Implements the wire surface of the HR core backend and the recruitment
//! service against in-memory state: the auth endpoints in their several
//! historical payload shapes, the resource APIs with their business rules,
//! and failure switches for driving a client down specific error paths.

pub mod api;
pub mod server;
pub mod state;

pub use server::MockServer;
pub use state::{LoginShape, MockState, MockUser};
