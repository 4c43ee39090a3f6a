mod context;
mod readback;
mod types;

pub use context::*;
pub use readback::*;
pub use types::*;
