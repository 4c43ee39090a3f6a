//! Time source for the marble: frame timing, the scroll clock, and the
//! frame loop handle.

mod clock;
mod driver;
mod frame_loop;

pub use clock::FrameClock;
pub use driver::AnimationDriver;
pub use frame_loop::{FrameLoop, FrameLoopState};
