//! Duty-cycle commands received on the voice channel, and the GPT output
//! they drive.

use crate::error::{Error, FspError};
use crate::fsp;
use crate::peripheral::Peripheral;
use embedded_hal::pwm::{Error as _, ErrorType, SetDutyCycle};

const ZERO_ASCII: u8 = b'0';
const NINE_ASCII: u8 = b'9';

/// Parse a line of one to three ASCII digits holding a value from 0 to 100.
pub fn parse_percent(line: &[u8]) -> Option<u8> {
    if line.is_empty() || line.len() > 3 {
        return None;
    }
    let mut value: u16 = 0;
    for &byte in line {
        if !(ZERO_ASCII..=NINE_ASCII).contains(&byte) {
            return None;
        }
        value = value * 10 + u16::from(byte - ZERO_ASCII);
    }
    if value <= 100 {
        Some(value as u8)
    } else {
        None
    }
}

/// Apply a duty-cycle command. Lines that are not a percentage are left
/// alone; only a failing PWM output is an error.
pub fn apply_command<P: SetDutyCycle>(pwm: &mut P, line: &[u8]) -> Result<Option<u8>, Error> {
    let Some(percent) = parse_percent(line) else {
        log::debug!("ignoring non-numeric command ({} bytes)", line.len());
        return Ok(None);
    };
    pwm.set_duty_cycle_percent(percent)
        .map_err(|err| Error::Pwm(err.kind()))?;
    log::info!("PWM duty set to {}%", percent);
    Ok(Some(percent))
}

/// Drive the output fully off; used when shutting down after a fault.
pub fn shutdown<P: SetDutyCycle>(pwm: &mut P) {
    if let Err(err) = pwm.set_duty_cycle_fully_off() {
        log::error!("PWM shutdown failed: {:?}", err.kind());
    }
}

/// A generated GPT timer instance (`g_<name>_ctrl` / `g_<name>_cfg`).
pub trait GptInstance: Peripheral {
    #[doc(hidden)]
    fn ctrl(&self) -> *mut fsp::timer_ctrl_t;
    #[doc(hidden)]
    fn cfg(&self) -> &'static fsp::timer_cfg_t;
}

/// PWM output on pin GTIOCA of a GPT instance.
pub struct GptPwm<T: GptInstance> {
    instance: T,
    period_counts: u32,
}

impl<T: GptInstance> GptPwm<T> {
    /// Open and start the timer with its generated configuration.
    pub fn open(instance: T) -> Result<Self, FspError> {
        let ctrl = instance.ctrl();
        let mut info = fsp::timer_info_t::default();
        unsafe {
            FspError::check(fsp::R_GPT_Open(ctrl, instance.cfg()))?;
            FspError::check(fsp::R_GPT_Start(ctrl))?;
            FspError::check(fsp::R_GPT_InfoGet(ctrl, &mut info))?;
        }
        log::debug!("GPT period {} counts", info.period_counts);
        Ok(Self {
            instance,
            period_counts: info.period_counts,
        })
    }

    pub fn period_counts(&self) -> u32 {
        self.period_counts
    }
}

impl<T: GptInstance> ErrorType for GptPwm<T> {
    type Error = FspError;
}

impl<T: GptInstance> SetDutyCycle for GptPwm<T> {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), FspError> {
        let counts = u64::from(self.period_counts) * u64::from(duty) / u64::from(u16::MAX);
        FspError::check(unsafe {
            fsp::R_GPT_DutyCycleSet(self.instance.ctrl(), counts as u32, fsp::GPT_IO_PIN_GTIOCA)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Duty(u16);

    impl embedded_hal::pwm::ErrorType for Duty {
        type Error = Infallible;
    }

    impl SetDutyCycle for Duty {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.0 = duty;
            Ok(())
        }
    }

    #[test]
    fn parses_percentages() {
        assert_eq!(parse_percent(b"0"), Some(0));
        assert_eq!(parse_percent(b"42"), Some(42));
        assert_eq!(parse_percent(b"100"), Some(100));
        assert_eq!(parse_percent(b"007"), Some(7));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(parse_percent(b""), None);
        assert_eq!(parse_percent(b"101"), None);
        assert_eq!(parse_percent(b"1000"), None);
        assert_eq!(parse_percent(b"4a"), None);
        assert_eq!(parse_percent(b"-1"), None);
    }

    #[test]
    fn command_scales_to_max_duty() {
        let mut pwm = Duty(0);
        assert_eq!(apply_command(&mut pwm, b"25"), Ok(Some(25)));
        assert_eq!(pwm.0, 250);
        assert_eq!(apply_command(&mut pwm, b"hi"), Ok(None));
        assert_eq!(pwm.0, 250);
        shutdown(&mut pwm);
        assert_eq!(pwm.0, 0);
    }
}
