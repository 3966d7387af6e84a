pub mod client;

use crate::error::TransportError;
use futures::future::BoxFuture;

pub use client::HttpTransport;

/// Sends a JSON body to a url and hands back the raw JSON reply.
///
/// Timeouts and cancellation belong to the implementation; callers see them
/// as a [`TransportError`].
pub trait Transport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<String, TransportError>>;
}
