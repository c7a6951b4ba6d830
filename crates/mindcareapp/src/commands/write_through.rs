//! # Write-Through Fallback
//!
//! User actions that nominally hit the API (posting, sending an SOS) must
//! never be lost when there is no API. [`deliver`] sends the request and, if
//! that fails for any reason (transport error, non-2xx status), runs the
//! equivalent local mutation instead.
//!
//! The request and the local mutation must describe the same record built
//! by the same constructor, and both sides must persist it through the same
//! store operation. Exactly one of them runs per call.

use crate::error::Result;
use crate::transport::{Request, Response, Transport};
use tracing::warn;

/// How an action reached storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The API (real or intercepted) accepted the request.
    Remote(Response),
    /// The API was unavailable; the record was written locally.
    Local { reason: String },
}

impl Delivery {
    pub fn is_local(&self) -> bool {
        matches!(self, Delivery::Local { .. })
    }
}

pub fn deliver<T, F>(transport: &T, request: &Request, local: F) -> Result<Delivery>
where
    T: Transport + ?Sized,
    F: FnOnce() -> Result<()>,
{
    let reason = match transport.send(request) {
        Ok(response) if response.is_success() => return Ok(Delivery::Remote(response)),
        Ok(response) => format!("server answered {}", response.status),
        Err(e) => e.to_string(),
    };
    warn!(path = %request.path, %reason, "request failed, applying change locally");
    local()?;
    Ok(Delivery::Local { reason })
}
