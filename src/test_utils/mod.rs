//! Test doubles for the backing RPC service.
//!
//! Enabled with the `test-utils` feature; integration tests consume it
//! through a path dev-dependency on this crate with that feature on.

mod mock;

pub use mock::{MockCall, MockDatabase, MockTransaction};
