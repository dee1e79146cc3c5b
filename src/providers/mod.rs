//! Upstream Printing API Integration
//!
//! Everything that talks to the external print-on-demand API: the throttled
//! HTTP client, the credential it injects, and the Printify client used by
//! the relay endpoints.
//!
//! ```text
//!   relay handler ──► PrintifyClient ──► RateLimitedClient ──► api.printify.com
//!                       (bearer token)      (quota, no retry)
//! ```

pub mod traits;
pub mod http_client;
pub mod printify;

pub use traits::{ProviderError, ProviderResult, ProviderCredentials};
pub use http_client::RateLimitedClient;
pub use printify::{PrintifyClient, PrintifyMapper, UpstreamBody};
