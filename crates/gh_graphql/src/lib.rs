pub mod client;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod model;

pub use client::{ClientOptions, GraphqlClient, DEFAULT_ENDPOINT};
pub use error::{GraphqlError, HttpStatusError};
pub use executor::{HttpExec, ReqwestExecutor};
pub use model::{ErrorEntry, ErrorExtensions, GraphqlResponse, Operation};
