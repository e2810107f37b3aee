use crate::timeout::TxTimeout;

/// Receive buffer capacity of the voice channel (UART0). Commands there are
/// short numeric values.
pub const VOICE_CAPACITY: usize = 4;

/// Receive buffer capacity of the PC channel (UART2).
pub const PC_CAPACITY: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    /// Name used in log messages.
    pub name: &'static str,
    pub tx_timeout: TxTimeout,
}

impl PortConfig {
    /// Default configuration for a channel whose receive buffer holds
    /// `capacity` bytes.
    pub const fn for_capacity(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            tx_timeout: TxTimeout::for_capacity(capacity),
        }
    }

    pub const fn voice() -> Self {
        Self::for_capacity("voice", VOICE_CAPACITY)
    }

    pub const fn pc() -> Self {
        Self::for_capacity("pc", PC_CAPACITY)
    }

    pub const fn with_timeout(self, tx_timeout: TxTimeout) -> Self {
        Self { tx_timeout, ..self }
    }
}
