use core::fmt::Write as _;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

const MESSAGE_LEN: usize = 96;
const QUEUE_DEPTH: usize = 16;

// Structure to hold log messages
pub struct LogMessage {
    pub level: log::Level,
    pub args: heapless::String<MESSAGE_LEN>,
    pub timestamp: u64,
}

// Records are queued from any context and written out by `drain_logs`,
// so logging never blocks on a UART.
static LOG_CHANNEL: Channel<CriticalSectionRawMutex, LogMessage, QUEUE_DEPTH> = Channel::new();
static mut LOGGER: RaLogger = RaLogger {
    level: log::LevelFilter::Error,
    clock: no_clock,
};

fn no_clock() -> u64 {
    0
}

/// Initialize the logger with the given maximum log level. `clock` supplies
/// the timestamp of each record.
pub fn init_logger(level: log::LevelFilter, clock: fn() -> u64) {
    unsafe {
        LOGGER.level = level;
        LOGGER.clock = clock;
        #[allow(static_mut_refs)]
        let installed = log::set_logger_racy(&LOGGER).is_ok();
        if installed {
            log::set_max_level_racy(level);
        }
    }
}

/// Write every queued record to `out`. Returns how many were written.
pub fn drain_logs<W: embedded_io::Write>(out: &mut W) -> usize {
    let receiver = LOG_CHANNEL.receiver();
    let mut count = 0;
    while let Ok(message) = receiver.try_receive() {
        if write_message(out, &message).is_err() {
            break;
        }
        count += 1;
    }
    count
}

/// Format one record as `LEVEL [timestamp] - message\r\n`.
pub fn write_message<W: embedded_io::Write>(out: &mut W, message: &LogMessage) -> Result<(), W::Error> {
    const RESET: &str = "\u{001B}[0m";
    const RED: &str = "\u{001B}[31m";
    const GREEN: &str = "\u{001B}[32m";
    const YELLOW: &str = "\u{001B}[33m";
    const BLUE: &str = "\u{001B}[34m";
    const CYAN: &str = "\u{001B}[35m";

    #[cfg(feature = "log-colors")]
    let color = match message.level {
        log::Level::Error => RED,
        log::Level::Warn => YELLOW,
        log::Level::Info => GREEN,
        log::Level::Debug => BLUE,
        log::Level::Trace => CYAN,
    };
    #[cfg(feature = "log-colors")]
    let reset = RESET;

    #[cfg(not(feature = "log-colors"))]
    let color = "";
    #[cfg(not(feature = "log-colors"))]
    let reset = "";

    let mut line: heapless::String<{ MESSAGE_LEN + 48 }> = heapless::String::new();
    let _ = write!(
        line,
        "{}{} [{}] - {}{}\r\n",
        color, message.level, message.timestamp, message.args, reset
    );
    out.write_all(line.as_bytes())
}

struct RaLogger {
    level: log::LevelFilter,
    clock: fn() -> u64,
}

impl log::Log for RaLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Overlong messages are truncated
        let mut args = heapless::String::new();
        let _ = write!(args, "{}", record.args());

        let message = LogMessage {
            level: record.level(),
            args,
            timestamp: (self.clock)(),
        };

        let _ = LOG_CHANNEL.try_send(message);
    }

    fn flush(&self) {}
}
