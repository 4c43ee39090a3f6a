use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLoopState {
    /// Created; no frame may be drawn yet.
    Pending,
    Running,
    /// Terminal. A cancelled loop never restarts.
    Cancelled,
}

/// Handle for the per-frame render loop.
///
/// The owner starts it once the scene exists and cancels it on teardown;
/// the event loop only schedules another frame while it is running.
#[derive(Debug)]
pub struct FrameLoop {
    state: FrameLoopState,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: FrameLoopState::Pending,
            frames: 0,
        }
    }

    /// Move from pending to running. Returns `false` if already cancelled.
    pub fn start(&mut self) -> bool {
        match self.state {
            FrameLoopState::Pending => {
                info!("frame loop started");
                self.state = FrameLoopState::Running;
                true
            }
            FrameLoopState::Running => true,
            FrameLoopState::Cancelled => false,
        }
    }

    pub fn cancel(&mut self) {
        if self.state != FrameLoopState::Cancelled {
            debug!(frames = self.frames, "frame loop cancelled");
            self.state = FrameLoopState::Cancelled;
        }
    }

    pub fn state(&self) -> FrameLoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FrameLoopState::Running
    }

    /// Count a drawn frame. Ignored unless running.
    pub fn record_frame(&mut self) {
        if self.is_running() {
            self.frames += 1;
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
