//! The two dispatch loops: the voice channel echoes what it receives and
//! drives the PWM output, the PC channel relays its lines to the voice
//! channel and echoes them back.

use crate::config::{PC_CAPACITY, VOICE_CAPACITY};
use crate::driver::UartDriver;
use crate::error::Error;
use crate::port::Port;
use crate::pwm;
use embedded_hal::pwm::SetDutyCycle;

pub struct EchoApp<'a, V, P, M>
where
    V: UartDriver,
    P: UartDriver,
    M: SetDutyCycle,
{
    voice: Port<'a, V, VOICE_CAPACITY>,
    pc: Port<'a, P, PC_CAPACITY>,
    pwm: M,
}

impl<'a, V, P, M> EchoApp<'a, V, P, M>
where
    V: UartDriver,
    P: UartDriver,
    M: SetDutyCycle,
{
    pub fn new(voice: Port<'a, V, VOICE_CAPACITY>, pc: Port<'a, P, PC_CAPACITY>, pwm: M) -> Self {
        Self { voice, pc, pwm }
    }

    pub fn voice(&self) -> &Port<'a, V, VOICE_CAPACITY> {
        &self.voice
    }

    pub fn pc(&self) -> &Port<'a, P, PC_CAPACITY> {
        &self.pc
    }

    pub fn pwm(&self) -> &M {
        &self.pwm
    }

    /// Service the voice channel once. Returns whether a line was dispatched.
    pub fn poll_voice(&mut self) -> Result<bool, Error> {
        let Some(line) = self.voice.channel().rx.take_line() else {
            return Ok(false);
        };
        if line.is_empty() {
            return Ok(false);
        }
        pwm::apply_command(&mut self.pwm, &line)?;
        self.voice.send(&line)?;
        Ok(true)
    }

    /// Service the PC channel once. Returns whether a line was dispatched.
    pub fn poll_pc(&mut self) -> Result<bool, Error> {
        let Some(line) = self.pc.channel().rx.take_line() else {
            return Ok(false);
        };
        if line.is_empty() {
            return Ok(false);
        }
        log::debug!("pc: relaying {} bytes", line.len());
        self.voice.send(&line)?;
        self.pc.send(&line)?;
        Ok(true)
    }

    pub fn poll(&mut self) -> Result<bool, Error> {
        let voice = self.poll_voice()?;
        let pc = self.poll_pc()?;
        Ok(voice || pc)
    }

    /// Switch the PWM output off and close both channels.
    pub fn teardown(&mut self) {
        pwm::shutdown(&mut self.pwm);
        let _ = self.voice.close();
        let _ = self.pc.close();
    }

    /// Service both channels forever, calling `idle` after every pass.
    ///
    /// On the first failure the PWM output is switched off, both channels
    /// are closed, `idle` runs one last time and the core is parked.
    pub fn run(self, idle: impl FnMut()) -> ! {
        self.run_with(Self::poll, idle)
    }

    /// Service only the voice channel forever.
    pub fn run_voice(self, idle: impl FnMut()) -> ! {
        self.run_with(Self::poll_voice, idle)
    }

    /// Service only the PC channel forever.
    pub fn run_pc(self, idle: impl FnMut()) -> ! {
        self.run_with(Self::poll_pc, idle)
    }

    fn run_with(
        mut self,
        mut poll: impl FnMut(&mut Self) -> Result<bool, Error>,
        mut idle: impl FnMut(),
    ) -> ! {
        loop {
            if let Err(err) = poll(&mut self) {
                log::error!("** UART FAILED: {} **", err);
                self.teardown();
                report_trap(&err);
                idle();
                error_trap(err);
            }
            idle();
        }
    }
}

/// Log the FSP code an unrecoverable error is reported as. Call before the
/// last drain of the log queue; nothing is drained once trapped.
pub fn report_trap(err: &Error) {
    log::error!("trapped with FSP error {}", err.code());
}

/// Park the core after an unrecoverable error.
pub fn error_trap(_err: Error) -> ! {
    loop {
        core::hint::spin_loop();
    }
}
