// Application layer - the session controller and the types it hands to clients.
// The ledger is owned here; the CLI reads and writes through it.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
