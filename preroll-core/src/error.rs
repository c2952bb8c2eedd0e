use thiserror::Error;

use preroll_contracts::{ElementError, TransportError};

/// Failures observed while loading one media item.
///
/// None of these are fatal to the host: every variant routes into either the
/// silent missing-source path or the direct-locator fallback, and the item
/// still terminates in its loaded state.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("element has no fetchable source")]
    MissingSource,

    #[error("network error: {0}")]
    Network(#[from] TransportError),

    #[error("element error: {0}")]
    Element(#[from] ElementError),

    #[error("transfer stalled past {0:?}")]
    Stalled(std::time::Duration),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
