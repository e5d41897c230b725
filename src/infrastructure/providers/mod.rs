mod registry;
mod retry;

pub use registry::{parse_model, require_api_key, ProviderConfig, PROVIDERS};
pub use retry::with_retry;
