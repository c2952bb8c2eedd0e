//! Trait surfaces that describe how the Preroll engine talks to its
//! collaborators: playable elements, the streaming transport, and the
//! presentation layer.
//!
//! The engine consumes these traits and nothing else; hosts supply the
//! implementations. Presentation markup, carousel navigation, and modal
//! handling live entirely on the host side of these seams.

pub mod element;
pub mod presentation;
pub mod transport;

/// Frequently used trait combinators for host and engine crates.
pub mod prelude {
    pub use super::element::{ElementError, MediaElement};
    pub use super::presentation::{NoopHooks, PresentationHooks};
    pub use super::transport::{
        ByteStream, MediaResponse, MediaTransport, TransportError,
    };
}

pub use element::{ElementError, MediaElement};
pub use presentation::{NoopHooks, PresentationHooks};
pub use transport::{ByteStream, MediaResponse, MediaTransport, TransportError};
