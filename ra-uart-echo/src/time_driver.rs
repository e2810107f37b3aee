use core::cell::{Cell, RefCell};
use critical_section::Mutex as CsMutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time_driver::Driver;
use embassy_time_queue_utils::Queue;

use cortex_m::peripheral::syst::SystClkSource;
use ra_uart::fsp;

// SysTick at the embassy tick rate (tick-hz-1_000)
const TICK_HZ: u32 = 1_000;

struct TimeDriver {
    ticks: CsMutex<Cell<u64>>,
    queue: Mutex<CriticalSectionRawMutex, RefCell<Queue>>,
}

embassy_time_driver::time_driver_impl!(static DRIVER: TimeDriver = TimeDriver {
    ticks: CsMutex::new(Cell::new(0)),
    queue: Mutex::const_new(CriticalSectionRawMutex::new(), RefCell::new(Queue::new())),
});

impl Driver for TimeDriver {
    fn now(&self) -> u64 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    fn schedule_wake(&self, at: u64, waker: &core::task::Waker) {
        critical_section::with(|cs| {
            let mut queue = self.queue.borrow(cs).borrow_mut();
            if queue.schedule_wake(at, waker) {
                // Every tick checks the queue, so only an already-due alarm needs handling here
                queue.next_expiration(self.now());
            }
        })
    }
}

impl TimeDriver {
    fn tick(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            let now = ticks.get() + 1;
            ticks.set(now);
            self.queue.borrow(cs).borrow_mut().next_expiration(now);
        })
    }
}

/// Safety: must be called exactly once, before anything reads the time
pub(crate) unsafe fn init() {
    let mut core = cortex_m::Peripherals::steal();
    let reload = fsp::SystemCoreClock / TICK_HZ - 1;
    core.SYST.set_clock_source(SystClkSource::Core);
    core.SYST.set_reload(reload);
    core.SYST.clear_current();
    core.SYST.enable_interrupt();
    core.SYST.enable_counter();
}

#[allow(non_snake_case)]
#[no_mangle]
extern "C" fn SysTick_Handler() {
    DRIVER.tick();
}
