//! The UART driver contract the channels are written against, and its
//! implementation over the FSP SCI UART driver.

use crate::error::FspError;
use crate::fsp;
use core::ptr;

/// Minimal driver surface: open, write, close. Completion and received bytes
/// arrive asynchronously through the channel's callback.
pub trait UartDriver {
    type Config: ?Sized;

    fn open(&mut self, config: &Self::Config) -> Result<(), FspError>;

    /// Start a write. Returns once the driver has accepted the request, not
    /// when the bytes are on the wire.
    fn write(&mut self, bytes: &[u8]) -> Result<(), FspError>;

    fn close(&mut self) -> Result<(), FspError>;
}

/// A generated SCI UART instance (`g_uartN_ctrl` / `g_uartN_cfg`).
pub trait SciInstance: crate::Peripheral {
    #[doc(hidden)]
    fn ctrl(&self) -> *mut fsp::uart_ctrl_t;
    #[doc(hidden)]
    fn cfg(&self) -> &'static fsp::uart_cfg_t;
    fn number(&self) -> u8;
}

pub struct FspUart<I: SciInstance> {
    instance: I,
}

impl<I: SciInstance> FspUart<I> {
    pub fn new(instance: I) -> Self {
        Self { instance }
    }

    /// The generated configuration for this instance, for passing to `open`.
    pub fn generated_config(&self) -> &'static fsp::uart_cfg_t {
        self.instance.cfg()
    }

    /// Point the driver's callback at `callback`, replacing whatever the
    /// generated configuration named.
    pub fn set_callback(&mut self, callback: fsp::uart_callback_t) -> Result<(), FspError> {
        FspError::check(unsafe {
            fsp::R_UART_CallbackSet(
                self.instance.ctrl(),
                Some(callback),
                ptr::null(),
                ptr::null_mut(),
            )
        })
    }
}

impl<I: SciInstance> UartDriver for FspUart<I> {
    type Config = fsp::uart_cfg_t;

    fn open(&mut self, config: &fsp::uart_cfg_t) -> Result<(), FspError> {
        log::debug!("Opening SCI{}", self.instance.number());
        FspError::check(unsafe { fsp::R_UART_Open(self.instance.ctrl(), config) })
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), FspError> {
        let len = u32::try_from(bytes.len()).map_err(|_| FspError(fsp::FSP_ERR_INVALID_ARGUMENT))?;
        FspError::check(unsafe { fsp::R_UART_Write(self.instance.ctrl(), bytes.as_ptr(), len) })
    }

    fn close(&mut self) -> Result<(), FspError> {
        FspError::check(unsafe { fsp::R_UART_Close(self.instance.ctrl()) })
    }
}
