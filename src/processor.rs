//! Response processors
//!
//! A processor turns the HTTP response of a request builder into its output:
//! [`Raw`] hands back the body text, [`Table`] builds a Polars DataFrame.

use crate::error::{Error, Result};
use crate::response::Response;

mod table;

pub use table::Table;

/// Converts an HTTP response into a request's output type
pub trait Processor {
    /// What `.get()` returns
    type Output;

    /// Check and convert the response
    fn process<R: Response>(&self, response: Result<R>) -> Result<Self::Output>;
}

/// Processor that returns the response body unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw;

impl Processor for Raw {
    type Output = String;

    fn process<R: Response>(&self, response: Result<R>) -> Result<String> {
        let resp = ensure_ok(response?)?;
        Ok(resp.body().to_owned())
    }
}

/// Turn a non-200 response into [`Error::Api`]
pub(crate) fn ensure_ok<R: Response>(resp: R) -> Result<R> {
    if resp.is_ok() {
        return Ok(resp);
    }
    Err(Error::Api {
        request_id: resp.request_id().to_owned(),
        status: resp.status(),
        message: resp.body().to_owned(),
    })
}

/// Alpha Vantage reports bad symbols, bad keys and exhausted quotas with a
/// 200 and a single-message JSON object.
pub(crate) fn provider_message(value: &serde_json::Value) -> Option<String> {
    ["Error Message", "Information", "Note"]
        .iter()
        .find_map(|key| value.get(key))
        .map(|msg| match msg.as_str() {
            Some(text) => text.to_owned(),
            None => msg.to_string(),
        })
}
