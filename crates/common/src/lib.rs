//! Shared plumbing for the Kuaizhan workspace: endpoint selection and logging.

mod endpoint;
mod logging;

pub use endpoint::{Endpoint, ParseEndpointError, ENDPOINT_ENV_VAR, PRODUCTION_BASE_URL};
pub use logging::init_logging;
