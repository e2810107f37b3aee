//! Echo/relay firmware. Built as a static library and linked into the FSP
//! project, which owns startup, vector tables and `hal_data`; the FSP
//! `main` calls [`hal_entry`].
#![no_std]

use core::fmt::Write as _;
use embassy_time::{Duration, Instant};
use ra_uart::fsp::{self, uart_callback_args_t, uart_callback_t};
use ra_uart::pwm::GptPwm;
use ra_uart::{
    echo, error_trap, gpt_instance, logger, sci_instance, Deadline, EchoApp, Error, FspUart,
    Peripheral, Port, PortConfig, SciInstance, TxStatus, TxTimeout, UartChannel, UartDriver,
    PC_CAPACITY, VOICE_CAPACITY,
};

mod time_driver;

const TX_TIMEOUT: TxTimeout = TxTimeout::After(Duration::from_millis(100));

// Only the transmit side of the console is used
const CONSOLE_CAPACITY: usize = 1;

static VOICE: UartChannel<VOICE_CAPACITY> = UartChannel::new();
static PC: UartChannel<PC_CAPACITY> = UartChannel::new();
static CONSOLE: UartChannel<CONSOLE_CAPACITY> = UartChannel::new();

sci_instance!(VoiceUart, 0);
sci_instance!(ConsoleUart, 1);
sci_instance!(PcUart, 2);
gpt_instance!(PwmTimer, g_timer);

const PANIC_MESSAGE_LEN: usize = 128;

#[no_mangle]
pub unsafe extern "C" fn user_uart_callback(p_args: *mut uart_callback_args_t) {
    VOICE.on_callback(p_args);
}

#[no_mangle]
pub unsafe extern "C" fn uart_pc_callback(p_args: *mut uart_callback_args_t) {
    PC.on_callback(p_args);
}

#[no_mangle]
pub unsafe extern "C" fn console_uart_callback(p_args: *mut uart_callback_args_t) {
    CONSOLE.on_callback(p_args);
}

fn open_port<I: SciInstance, const N: usize>(
    sci: I,
    channel: &'static UartChannel<N>,
    callback: uart_callback_t,
    config: PortConfig,
) -> Result<Port<'static, FspUart<I>, N>, Error> {
    let driver = FspUart::new(sci);
    let generated = driver.generated_config();
    let mut port = Port::open(driver, generated, channel, config)?;
    port.driver_mut()
        .set_callback(callback)
        .map_err(Error::OpenFailure)?;
    Ok(port)
}

#[no_mangle]
pub extern "C" fn hal_entry() {
    unsafe { time_driver::init() };
    logger::init_logger(log::LevelFilter::Info, || Instant::now().as_millis());

    // hal_entry runs once, so each instance is taken exactly once. Until the
    // console is open there is nowhere to report a failure.
    let (Some(voice_sci), Some(console_sci), Some(pc_sci), Some(timer)) = (
        VoiceUart::take(),
        ConsoleUart::take(),
        PcUart::take(),
        PwmTimer::take(),
    ) else {
        error_trap(Error::OpenFailure(ra_uart::FspError(fsp::FSP_ERR_IN_USE)));
    };

    let mut console = match open_port(
        console_sci,
        &CONSOLE,
        console_uart_callback,
        PortConfig::for_capacity("console", CONSOLE_CAPACITY).with_timeout(TX_TIMEOUT),
    ) {
        Ok(console) => console,
        Err(err) => error_trap(err),
    };
    // The generated g_uart1 configuration names uart_pc_callback, so anything
    // received before the callback was replaced landed in the PC channel
    PC.clear();

    let app = match open_app(voice_sci, pc_sci, timer) {
        Ok(app) => app,
        Err(err) => {
            echo::report_trap(&err);
            logger::drain_logs(&mut console);
            error_trap(err)
        }
    };

    log::info!("echo ready");
    app.run(move || {
        logger::drain_logs(&mut console);
    })
}

fn open_app(
    voice_sci: VoiceUart,
    pc_sci: PcUart,
    timer: PwmTimer,
) -> Result<EchoApp<'static, FspUart<VoiceUart>, FspUart<PcUart>, GptPwm<PwmTimer>>, Error> {
    let voice = open_port(
        voice_sci,
        &VOICE,
        user_uart_callback,
        PortConfig::voice().with_timeout(TX_TIMEOUT),
    )?;
    let pc = open_port(
        pc_sci,
        &PC,
        uart_pc_callback,
        PortConfig::pc().with_timeout(TX_TIMEOUT),
    )?;
    let pwm = GptPwm::open(timer).map_err(Error::OpenFailure)?;
    Ok(EchoApp::new(voice, pc, pwm))
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    // No logger or critical section while panicking: write straight to the
    // console and wait for it with a polling bound, not the time driver
    let mut msg: heapless::String<PANIC_MESSAGE_LEN> = heapless::String::new();
    let _ = write!(msg, "\r\nPANIC: {}\r\n", info);
    let mut console = FspUart::new(unsafe { ConsoleUart::steal() });
    CONSOLE.events.reset();
    if console.write(msg.as_bytes()).is_ok() {
        let mut deadline = Deadline::start(TxTimeout::for_capacity(PANIC_MESSAGE_LEN));
        while CONSOLE.events.last().tx_status() == TxStatus::Pending && !deadline.expired() {
            core::hint::spin_loop();
        }
    }
    cortex_m::interrupt::disable();
    loop {
        core::hint::spin_loop();
    }
}
