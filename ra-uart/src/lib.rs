//! Interrupt-driven, line-buffered UART channels on top of the Renesas FSP
//! SCI UART driver.
//!
//! Each channel pairs a [`ReceiveBuffer`] filled byte by byte from the
//! driver's interrupt callback with an [`EventState`] the blocking
//! transmitter polls for completion. [`EchoApp`] ties a voice channel and a
//! PC channel together into the echo/relay firmware loops.
#![cfg_attr(not(test), no_std)]

pub use ra_fsp as fsp;

#[doc(hidden)]
pub use critical_section as __critical_section;
#[doc(hidden)]
pub use paste;

mod buffer;
pub use buffer::{Line, ReceiveBuffer, CARRIAGE_RETURN};

mod channel;
pub use channel::UartChannel;

pub mod config;
pub use config::{PortConfig, PC_CAPACITY, VOICE_CAPACITY};

pub mod driver;
pub use driver::{FspUart, SciInstance, UartDriver};

pub mod echo;
pub use echo::{error_trap, EchoApp};

mod error;
pub use error::{Error, FspError};

mod event;
pub use event::{EventState, TxStatus, UartEvent};

pub mod logger;

mod peripheral;
pub use peripheral::Peripheral;

mod port;
pub use port::Port;

pub mod pwm;

mod timeout;
pub use timeout::{Deadline, TxTimeout};
