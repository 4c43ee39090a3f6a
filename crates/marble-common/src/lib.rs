pub mod errors;
pub mod types;

pub use errors::{ConfigError, MarbleError, ResourceLoadError, ShaderAugmentationError};
pub use types::Color;

pub type Result<T> = std::result::Result<T, MarbleError>;
