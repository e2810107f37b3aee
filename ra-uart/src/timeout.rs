use embassy_time::{Duration, Instant};

/// Iterations per buffer byte in the legacy busy-wait bound.
pub const ITERATIONS_PER_BYTE: u32 = u16::MAX as u32;

/// How long a write may take before it is reported as timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxTimeout {
    /// Give up after this many polls of the event state. The real duration
    /// depends on the core clock.
    Iterations(u32),
    /// Give up once this much time has passed since the write was issued.
    After(Duration),
}

impl TxTimeout {
    /// The legacy bound for a channel of the given buffer capacity.
    pub const fn for_capacity(capacity: usize) -> Self {
        TxTimeout::Iterations((capacity as u32).saturating_mul(ITERATIONS_PER_BYTE))
    }
}

/// A started [`TxTimeout`].
#[derive(Debug)]
pub enum Deadline {
    Remaining(u32),
    At(Instant),
}

impl Deadline {
    pub fn start(timeout: TxTimeout) -> Self {
        match timeout {
            TxTimeout::Iterations(n) => Deadline::Remaining(n),
            TxTimeout::After(duration) => Deadline::At(Instant::now() + duration),
        }
    }

    /// Account for one poll and report whether the deadline has passed.
    pub fn expired(&mut self) -> bool {
        match self {
            Deadline::Remaining(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
            Deadline::At(at) => Instant::now() >= *at,
        }
    }
}
