//! Remote peer API consumed by the wallet.
//!
//! - [`PeerApi`]: the transport seam (one JSON GET per call)
//! - [`PeerClient`]: the `reqwest` implementation
//! - [`responses`]: wire payloads and their conversion into wallet types

pub mod api;
pub mod client;
pub mod de;
pub mod error;
pub mod responses;

pub use api::{PeerApi, PeerRequest};
pub use client::PeerClient;
pub use error::PeerError;
