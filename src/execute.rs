//! Execute trait for running API requests
//!
//! Every statement request builder implements [`Execute`]; the processor
//! attached to the builder decides what `.get()` returns.

use crate::error::Result;

/// Trait for executing API requests
pub trait Execute {
    /// The output type of the request
    type Output;

    /// Send the request and process the response
    fn get(self) -> impl std::future::Future<Output = Result<Self::Output>>;
}
