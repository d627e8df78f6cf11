//! HTTP server lifecycle

mod shutdown;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
