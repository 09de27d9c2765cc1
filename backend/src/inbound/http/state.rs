//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{TransactionCatalogue, TransactionDispatch};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dispatch: Arc<dyn TransactionDispatch>,
    pub catalogue: Arc<dyn TransactionCatalogue>,
    /// Delay used when a dispatch request does not name one.
    pub default_delay_seconds: i64,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        dispatch: Arc<dyn TransactionDispatch>,
        catalogue: Arc<dyn TransactionCatalogue>,
        default_delay_seconds: i64,
    ) -> Self {
        Self {
            dispatch,
            catalogue,
            default_delay_seconds,
        }
    }
}
