use crate::fsp;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Event code reported by the driver callback, as a set of `UART_EVENT_*` bits.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct UartEvent(u32);

impl UartEvent {
    /// Neutral value the transmitter resets to before each write.
    pub const NONE: Self = Self(0);
    pub const RX_COMPLETE: Self = Self(fsp::UART_EVENT_RX_COMPLETE);
    pub const TX_COMPLETE: Self = Self(fsp::UART_EVENT_TX_COMPLETE);
    pub const RX_CHAR: Self = Self(fsp::UART_EVENT_RX_CHAR);
    pub const ERR_PARITY: Self = Self(fsp::UART_EVENT_ERR_PARITY);
    pub const ERR_FRAMING: Self = Self(fsp::UART_EVENT_ERR_FRAMING);
    pub const ERR_OVERFLOW: Self = Self(fsp::UART_EVENT_ERR_OVERFLOW);
    pub const BREAK_DETECT: Self = Self(fsp::UART_EVENT_BREAK_DETECT);
    pub const TX_DATA_EMPTY: Self = Self(fsp::UART_EVENT_TX_DATA_EMPTY);

    /// Break, overflow, framing and parity: any of these aborts a transfer.
    pub const ERRORS: Self = Self(
        fsp::UART_EVENT_BREAK_DETECT
            | fsp::UART_EVENT_ERR_OVERFLOW
            | fsp::UART_EVENT_ERR_FRAMING
            | fsp::UART_EVENT_ERR_PARITY,
    );

    pub const fn from_bits(bits: fsp::uart_event_t) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> fsp::uart_event_t {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_error(&self) -> bool {
        self.intersects(Self::ERRORS)
    }

    /// Classify the event from the point of view of a pending write.
    ///
    /// Completion wins over error bits, matching the order in which the
    /// transmitter checks them.
    pub const fn tx_status(&self) -> TxStatus {
        if self.contains(Self::TX_COMPLETE) {
            TxStatus::Complete
        } else if self.is_error() {
            TxStatus::Aborted
        } else {
            TxStatus::Pending
        }
    }
}

impl fmt::Debug for UartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(UartEvent, &str); 8] = [
            (UartEvent::RX_COMPLETE, "RX_COMPLETE"),
            (UartEvent::TX_COMPLETE, "TX_COMPLETE"),
            (UartEvent::RX_CHAR, "RX_CHAR"),
            (UartEvent::ERR_PARITY, "ERR_PARITY"),
            (UartEvent::ERR_FRAMING, "ERR_FRAMING"),
            (UartEvent::ERR_OVERFLOW, "ERR_OVERFLOW"),
            (UartEvent::BREAK_DETECT, "BREAK_DETECT"),
            (UartEvent::TX_DATA_EMPTY, "TX_DATA_EMPTY"),
        ];
        if self.0 == 0 {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (event, name) in NAMES {
            if self.contains(event) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        let unknown = self.0 & !0xff;
        if unknown != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{:#x}", unknown)?;
        }
        Ok(())
    }
}

/// Where a write stands given the last event seen on its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Complete,
    Aborted,
}

/// Last event observed on a channel. Written from the interrupt callback,
/// read by the transmitter.
pub struct EventState {
    last: AtomicU32,
}

impl EventState {
    pub const fn new() -> Self {
        Self {
            last: AtomicU32::new(0),
        }
    }

    pub fn record(&self, event: UartEvent) {
        self.last.store(event.bits(), Ordering::Release);
    }

    pub fn reset(&self) {
        self.record(UartEvent::NONE);
    }

    pub fn last(&self) -> UartEvent {
        UartEvent::from_bits(self.last.load(Ordering::Acquire))
    }
}

impl Default for EventState {
    fn default() -> Self {
        Self::new()
    }
}
