use crate::channel::UartChannel;
use crate::config::PortConfig;
use crate::driver::UartDriver;
use crate::error::Error;
use crate::event::TxStatus;
use crate::timeout::Deadline;
use embassy_embedded_hal::SetConfig;

/// An open UART channel: the driver that writes to it plus the channel
/// state its callback fills in.
pub struct Port<'a, D: UartDriver, const N: usize> {
    driver: D,
    channel: &'a UartChannel<N>,
    config: PortConfig,
}

impl<'a, D: UartDriver, const N: usize> Port<'a, D, N> {
    pub fn open(
        mut driver: D,
        driver_config: &D::Config,
        channel: &'a UartChannel<N>,
        config: PortConfig,
    ) -> Result<Self, Error> {
        if let Err(err) = driver.open(driver_config) {
            log::error!("{}: open failed ({})", config.name, err);
            return Err(Error::OpenFailure(err));
        }
        log::info!("{}: open", config.name);
        Ok(Self {
            driver,
            channel,
            config,
        })
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn channel(&self) -> &'a UartChannel<N> {
        self.channel
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Send a NUL-terminated message: only the bytes before the first NUL
    /// (or the whole slice if there is none) go out.
    pub fn send(&mut self, msg: &[u8]) -> Result<(), Error> {
        let len = msg.iter().position(|&b| b == 0).unwrap_or(msg.len());
        self.transmit(&msg[..len])
    }

    /// Write `bytes` and wait until the driver reports the transfer
    /// complete, aborted, or the configured timeout passes.
    pub fn transmit(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.is_empty() {
            return Ok(());
        }

        let events = &self.channel.events;
        events.reset();

        if let Err(err) = self.driver.write(bytes) {
            log::error!("{}: write rejected ({})", self.config.name, err);
            return Err(Error::WriteFailure(err));
        }

        let mut deadline = Deadline::start(self.config.tx_timeout);
        loop {
            let event = events.last();
            match event.tx_status() {
                TxStatus::Complete => return Ok(()),
                TxStatus::Aborted => {
                    log::error!("{}: error event {:?}", self.config.name, event);
                    return Err(Error::TransferAborted(event));
                }
                TxStatus::Pending => {}
            }
            if deadline.expired() {
                log::error!("{}: transmit timed out", self.config.name);
                return Err(Error::Timeout);
            }
            core::hint::spin_loop();
        }
    }

    /// Close the channel. Failure is logged and returned; there is nothing
    /// further to do about it.
    pub fn close(&mut self) -> Result<(), Error> {
        self.driver.close().map_err(|err| {
            log::error!("{}: close failed ({})", self.config.name, err);
            Error::CloseFailure(err)
        })
    }
}

impl<D: UartDriver, const N: usize> SetConfig for Port<'_, D, N> {
    type Config = PortConfig;
    type ConfigError = ();
    fn set_config(&mut self, config: &Self::Config) -> Result<(), ()> {
        self.config = *config;
        Ok(())
    }
}

impl<D: UartDriver, const N: usize> embedded_io::ErrorType for Port<'_, D, N> {
    type Error = Error;
}

impl<D: UartDriver, const N: usize> embedded_io::Write for Port<'_, D, N> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        self.transmit(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Error> {
        // `transmit` only returns after TX_COMPLETE
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FspError;
    use crate::event::UartEvent;
    use crate::fsp;
    use crate::timeout::TxTimeout;
    use embassy_time::Duration;

    /// Stands in for the FSP driver; raises `reply` on the channel from
    /// inside `write`, the way the transmit interrupt would.
    struct FakeUart<'a> {
        channel: &'a UartChannel<4>,
        reply: Option<UartEvent>,
        write_result: Result<(), FspError>,
        written: Vec<Vec<u8>>,
    }

    impl<'a> FakeUart<'a> {
        fn new(channel: &'a UartChannel<4>, reply: Option<UartEvent>) -> Self {
            Self {
                channel,
                reply,
                write_result: Ok(()),
                written: Vec::new(),
            }
        }
    }

    impl UartDriver for FakeUart<'_> {
        type Config = ();

        fn open(&mut self, _config: &()) -> Result<(), FspError> {
            Ok(())
        }

        fn write(&mut self, bytes: &[u8]) -> Result<(), FspError> {
            self.write_result?;
            self.written.push(bytes.to_vec());
            if let Some(event) = self.reply {
                self.channel.on_event(event, 0);
            }
            Ok(())
        }

        fn close(&mut self) -> Result<(), FspError> {
            Ok(())
        }
    }

    fn config(iterations: u32) -> PortConfig {
        PortConfig::voice().with_timeout(TxTimeout::Iterations(iterations))
    }

    #[test]
    fn complete_event_is_success() {
        let channel = UartChannel::new();
        let driver = FakeUart::new(&channel, Some(UartEvent::TX_COMPLETE));
        let mut port = Port::open(driver, &(), &channel, config(100)).unwrap();
        assert_eq!(port.send(b"hi"), Ok(()));
        assert_eq!(port.driver().written, vec![b"hi".to_vec()]);
    }

    #[test]
    fn error_event_aborts() {
        let channel = UartChannel::new();
        let driver = FakeUart::new(&channel, Some(UartEvent::ERR_OVERFLOW));
        let mut port = Port::open(driver, &(), &channel, config(100)).unwrap();
        assert_eq!(
            port.send(b"hi"),
            Err(Error::TransferAborted(UartEvent::ERR_OVERFLOW))
        );
    }

    #[test]
    fn silence_times_out_after_iteration_bound() {
        let channel = UartChannel::new();
        let driver = FakeUart::new(&channel, None);
        let mut port = Port::open(driver, &(), &channel, config(100)).unwrap();
        assert_eq!(port.send(b"hi"), Err(Error::Timeout));
    }

    #[test]
    fn silence_times_out_after_duration() {
        let channel = UartChannel::new();
        let driver = FakeUart::new(&channel, None);
        let config = PortConfig::voice().with_timeout(TxTimeout::After(Duration::from_millis(10)));
        let mut port = Port::open(driver, &(), &channel, config).unwrap();
        assert_eq!(port.send(b"hi"), Err(Error::Timeout));
    }

    #[test]
    fn stale_completion_is_cleared_before_write() {
        let channel = UartChannel::new();
        channel.on_event(UartEvent::TX_COMPLETE, 0);
        let driver = FakeUart::new(&channel, None);
        let mut port = Port::open(driver, &(), &channel, config(100)).unwrap();
        assert_eq!(port.send(b"hi"), Err(Error::Timeout));
    }

    #[test]
    fn rejected_write_is_reported() {
        let channel = UartChannel::new();
        let mut driver = FakeUart::new(&channel, Some(UartEvent::TX_COMPLETE));
        driver.write_result = Err(FspError(fsp::FSP_ERR_IN_USE));
        let mut port = Port::open(driver, &(), &channel, config(100)).unwrap();
        assert_eq!(
            port.send(b"hi"),
            Err(Error::WriteFailure(FspError(fsp::FSP_ERR_IN_USE)))
        );
    }

    #[test]
    fn send_stops_at_nul() {
        let channel = UartChannel::new();
        let driver = FakeUart::new(&channel, Some(UartEvent::TX_COMPLETE));
        let mut port = Port::open(driver, &(), &channel, config(100)).unwrap();
        port.send(b"ok\0junk").unwrap();
        port.send(b"\0").unwrap();
        assert_eq!(port.driver().written, vec![b"ok".to_vec()]);
    }

    #[test]
    fn io_write_sends_every_byte() {
        use embedded_io::Write;

        let channel = UartChannel::new();
        let driver = FakeUart::new(&channel, Some(UartEvent::TX_COMPLETE));
        let mut port = Port::open(driver, &(), &channel, config(100)).unwrap();
        port.write_all(b"a\0b").unwrap();
        assert_eq!(port.driver().written, vec![b"a\0b".to_vec()]);
    }

    #[test]
    fn set_config_replaces_timeout() {
        let channel = UartChannel::new();
        let driver = FakeUart::new(&channel, None);
        let mut port = Port::open(driver, &(), &channel, config(u32::MAX)).unwrap();
        port.set_config(&config(5)).unwrap();
        assert_eq!(port.send(b"hi"), Err(Error::Timeout));
    }
}
