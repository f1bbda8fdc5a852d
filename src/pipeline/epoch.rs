use serde::{Deserialize, Serialize};

/// Monotonic request-ordering token. Exactly one epoch is "current" at any
/// time: the most recently issued one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestEpoch(pub u64);

/// Shared counter owned by the session. Incremented immediately before each
/// search dispatch; a response is applied only if it carries the current
/// epoch, so a slow early request can never overwrite a faster later one.
#[derive(Debug, Default)]
pub struct EpochCounter {
    issued: u64,
}

impl EpochCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestEpoch {
        self.issued += 1;
        RequestEpoch(self.issued)
    }

    pub fn current(&self) -> RequestEpoch {
        RequestEpoch(self.issued)
    }

    pub fn is_current(&self, epoch: RequestEpoch) -> bool {
        epoch == self.current()
    }
}
