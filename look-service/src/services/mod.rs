pub mod prompt;
pub mod providers;

pub use providers::{ContentPart, ContentProvider, ProviderError};
