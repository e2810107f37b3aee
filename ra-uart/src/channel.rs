use crate::buffer::ReceiveBuffer;
use crate::event::{EventState, UartEvent};
use crate::fsp;

/// State shared between one UART's interrupt callback and the main loop.
///
/// Meant to live in a `static`; the callback and the [`Port`](crate::Port)
/// for the channel both hold a shared reference to it.
pub struct UartChannel<const N: usize> {
    pub rx: ReceiveBuffer<N>,
    pub events: EventState,
}

impl<const N: usize> UartChannel<N> {
    pub const fn new() -> Self {
        Self {
            rx: ReceiveBuffer::new(),
            events: EventState::new(),
        }
    }

    /// Handle one driver callback. Runs in interrupt context.
    pub fn on_event(&self, event: UartEvent, data: u32) {
        self.events.record(event);
        if event.contains(UartEvent::RX_CHAR) {
            self.rx.push(data as u8);
        }
    }

    /// Forget everything received and the last event, e.g. bytes another
    /// UART's callback routed here before it was pointed elsewhere.
    pub fn clear(&self) {
        self.rx.clear();
        self.events.reset();
    }

    /// Adapter for the C callback signature.
    ///
    /// # Safety
    /// `p_args` must be null or point to a valid `uart_callback_args_t` for
    /// the duration of the call.
    pub unsafe fn on_callback(&self, p_args: *const fsp::uart_callback_args_t) {
        if let Some(args) = p_args.as_ref() {
            self.on_event(UartEvent::from_bits(args.event), args.data);
        }
    }
}

impl<const N: usize> Default for UartChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::CARRIAGE_RETURN;

    #[test]
    fn only_rx_char_feeds_the_buffer() {
        let channel = UartChannel::<4>::new();
        channel.on_event(UartEvent::TX_COMPLETE, b'x' as u32);
        assert_eq!(channel.rx.index(), 0);
        assert_eq!(channel.events.last(), UartEvent::TX_COMPLETE);

        channel.on_event(UartEvent::RX_CHAR, b'x' as u32);
        assert_eq!(channel.rx.index(), 1);
        assert_eq!(channel.events.last(), UartEvent::RX_CHAR);
    }

    #[test]
    fn raw_callback_is_decoded() {
        static CHANNEL: UartChannel<4> = UartChannel::new();
        for byte in [b'o', b'k', CARRIAGE_RETURN] {
            let args = fsp::uart_callback_args_t {
                channel: 0,
                event: fsp::UART_EVENT_RX_CHAR,
                data: byte as u32,
                p_context: core::ptr::null(),
            };
            unsafe { CHANNEL.on_callback(&args) };
        }
        assert_eq!(&CHANNEL.rx.take_line().unwrap()[..], b"ok");
    }

    #[test]
    fn null_callback_args_are_ignored() {
        let channel = UartChannel::<4>::new();
        unsafe { channel.on_callback(core::ptr::null()) };
        assert_eq!(channel.events.last(), UartEvent::NONE);
    }

    #[test]
    fn clear_drops_misrouted_bytes() {
        let channel = UartChannel::<255>::new();
        for byte in [b'a', b't', CARRIAGE_RETURN, b'x'] {
            channel.on_event(UartEvent::RX_CHAR, byte as u32);
        }
        channel.clear();
        assert!(channel.rx.take_line().is_none());
        assert_eq!(channel.rx.index(), 0);
        assert_eq!(channel.events.last(), UartEvent::NONE);

        for byte in [b'o', b'k', CARRIAGE_RETURN] {
            channel.on_event(UartEvent::RX_CHAR, byte as u32);
        }
        assert_eq!(&channel.rx.take_line().unwrap()[..], b"ok");
    }
}
