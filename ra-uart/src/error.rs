use crate::event::UartEvent;
use crate::fsp;
use core::fmt;

/// Non-success code returned by an FSP driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FspError(pub fsp::fsp_err_t);

impl FspError {
    pub fn check(code: fsp::fsp_err_t) -> Result<(), FspError> {
        if code == fsp::FSP_SUCCESS {
            Ok(())
        } else {
            Err(FspError(code))
        }
    }

    pub fn code(&self) -> fsp::fsp_err_t {
        self.0
    }
}

impl fmt::Display for FspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FSP error {}", self.0)
    }
}

// Lets FSP-backed peripherals (e.g. a GPT PWM output) use it as their error type
impl embedded_hal::pwm::Error for FspError {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The driver refused to open the channel.
    OpenFailure(FspError),
    /// The driver rejected the write request itself.
    WriteFailure(FspError),
    /// An error-class event arrived while waiting for the write to finish.
    TransferAborted(UartEvent),
    /// Neither completion nor an error arrived before the deadline.
    Timeout,
    CloseFailure(FspError),
    Pwm(embedded_hal::pwm::ErrorKind),
}

impl Error {
    /// The FSP code this error is reported as when the firmware traps.
    pub fn code(&self) -> fsp::fsp_err_t {
        match self {
            Error::OpenFailure(err) | Error::WriteFailure(err) | Error::CloseFailure(err) => {
                err.code()
            }
            Error::TransferAborted(_) => fsp::FSP_ERR_TRANSFER_ABORTED,
            Error::Timeout => fsp::FSP_ERR_TIMEOUT,
            Error::Pwm(_) => fsp::FSP_ERR_ABORTED,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OpenFailure(err) => write!(f, "open failed: {}", err),
            Error::WriteFailure(err) => write!(f, "write failed: {}", err),
            Error::TransferAborted(event) => write!(f, "transfer aborted by {:?}", event),
            Error::Timeout => write!(f, "transmit timed out"),
            Error::CloseFailure(err) => write!(f, "close failed: {}", err),
            Error::Pwm(kind) => write!(f, "PWM error: {:?}", kind),
        }
    }
}

impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Error::Timeout => embedded_io::ErrorKind::TimedOut,
            Error::OpenFailure(_) | Error::CloseFailure(_) => embedded_io::ErrorKind::NotConnected,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_success_only() {
        assert_eq!(FspError::check(fsp::FSP_SUCCESS), Ok(()));
        assert_eq!(
            FspError::check(fsp::FSP_ERR_NOT_OPEN),
            Err(FspError(fsp::FSP_ERR_NOT_OPEN))
        );
    }

    #[test]
    fn send_failures_map_to_fsp_codes() {
        assert_eq!(Error::Timeout.code(), fsp::FSP_ERR_TIMEOUT);
        assert_eq!(
            Error::TransferAborted(UartEvent::ERR_FRAMING).code(),
            fsp::FSP_ERR_TRANSFER_ABORTED
        );
        assert_eq!(
            Error::WriteFailure(FspError(fsp::FSP_ERR_IN_USE)).code(),
            fsp::FSP_ERR_IN_USE
        );
    }

    #[test]
    fn aborted_transfer_is_not_retryable() {
        use embedded_io::Error as _;

        let err = Error::TransferAborted(UartEvent::ERR_OVERFLOW);
        assert_eq!(err.kind(), embedded_io::ErrorKind::Other);
        assert_eq!(Error::Timeout.kind(), embedded_io::ErrorKind::TimedOut);
    }
}
