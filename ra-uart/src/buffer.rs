use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

/// Line terminator (ASCII carriage return).
pub const CARRIAGE_RETURN: u8 = 13;

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: AtomicU8 = AtomicU8::new(0);

/// A line taken out of a [`ReceiveBuffer`].
pub type Line<const N: usize> = heapless::Vec<u8, N>;

/// Fixed-capacity receive buffer filled one byte at a time from interrupt
/// context.
///
/// The interrupt side is the only writer of the bytes and the index; the
/// main loop only reads the bytes after observing the ready flag and
/// clears the flag as it consumes the line. Nothing locks the two sides
/// against each other: a terminator arriving while a line is being taken
/// can mix two lines.
pub struct ReceiveBuffer<const N: usize> {
    bytes: [AtomicU8; N],
    index: AtomicUsize,
    ready: AtomicBool,
}

impl<const N: usize> ReceiveBuffer<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [EMPTY_SLOT; N],
            index: AtomicUsize::new(0),
            ready: AtomicBool::new(false),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Feed one received byte. Constant time, never blocks.
    ///
    /// The terminator rewinds the index and raises the ready flag. Any
    /// other byte is stored and the index wraps to zero at capacity,
    /// silently overwriting the oldest bytes of an unterminated line.
    pub fn push(&self, byte: u8) {
        if byte == CARRIAGE_RETURN {
            self.index.store(0, Ordering::Relaxed);
            self.ready.store(true, Ordering::Release);
            return;
        }
        let index = self.index.load(Ordering::Relaxed);
        self.bytes[index].store(byte, Ordering::Relaxed);
        let next = index + 1;
        self.index
            .store(if next == N { 0 } else { next }, Ordering::Relaxed);
    }

    pub fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Take the pending line, clearing the ready flag.
    ///
    /// The line runs up to the first NUL in the buffer. The buffer is not
    /// cleared between lines, so a shorter line is followed by whatever a
    /// longer earlier line left behind it.
    pub fn take_line(&self) -> Option<Line<N>> {
        if !self.ready.swap(false, Ordering::AcqRel) {
            return None;
        }
        let mut line = Line::new();
        for byte in &self.bytes {
            let byte = byte.load(Ordering::Relaxed);
            if byte == 0 {
                break;
            }
            // Capacity of `line` equals N, so this cannot fail.
            let _ = line.push(byte);
        }
        Some(line)
    }

    /// Drop any partial or pending line and zero every slot.
    pub fn clear(&self) {
        self.ready.store(false, Ordering::Relaxed);
        self.index.store(0, Ordering::Relaxed);
        for byte in &self.bytes {
            byte.store(0, Ordering::Relaxed);
        }
    }

    /// Raw snapshot of every byte slot.
    pub fn contents(&self) -> [u8; N] {
        let mut out = [0; N];
        for (slot, byte) in out.iter_mut().zip(&self.bytes) {
            *slot = byte.load(Ordering::Relaxed);
        }
        out
    }
}

impl<const N: usize> Default for ReceiveBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<const N: usize>(buffer: &ReceiveBuffer<N>, bytes: &[u8]) {
        for &byte in bytes {
            buffer.push(byte);
        }
    }

    #[test]
    fn short_input_is_stored_in_order() {
        let buffer = ReceiveBuffer::<255>::new();
        feed(&buffer, b"abc");
        assert_eq!(&buffer.contents()[..4], b"abc\0");
        assert_eq!(buffer.index(), 3);
        assert!(!buffer.is_ready());
        assert!(buffer.take_line().is_none());
    }

    #[test]
    fn input_one_short_of_capacity() {
        let buffer = ReceiveBuffer::<4>::new();
        feed(&buffer, b"xyz");
        assert_eq!(buffer.contents(), *b"xyz\0");
        assert_eq!(buffer.index(), 3);
        assert!(!buffer.is_ready());
    }

    #[test]
    fn terminator_rewinds_from_any_index() {
        for prefix in [&b""[..], b"a", b"ab", b"abc"] {
            let buffer = ReceiveBuffer::<4>::new();
            feed(&buffer, prefix);
            buffer.push(CARRIAGE_RETURN);
            assert_eq!(buffer.index(), 0);
            assert!(buffer.is_ready());
        }
    }

    #[test]
    fn fifth_byte_wraps_to_slot_zero() {
        let buffer = ReceiveBuffer::<4>::new();
        feed(&buffer, b"abcd");
        assert_eq!(buffer.contents(), *b"abcd");
        assert_eq!(buffer.index(), 0);

        buffer.push(b'e');
        assert_eq!(buffer.contents(), *b"ebcd");
        assert_eq!(buffer.index(), 1);
        assert!(!buffer.is_ready());
    }

    #[test]
    fn take_line_clears_ready() {
        let buffer = ReceiveBuffer::<4>::new();
        feed(&buffer, b"hi\r");
        let line = buffer.take_line().unwrap();
        assert_eq!(&line[..], b"hi");
        assert!(!buffer.is_ready());
        assert!(buffer.take_line().is_none());
    }

    #[test]
    fn full_buffer_line_has_no_nul() {
        let buffer = ReceiveBuffer::<4>::new();
        feed(&buffer, b"1234\r");
        assert_eq!(&buffer.take_line().unwrap()[..], b"1234");
    }

    #[test]
    fn shorter_line_keeps_stale_tail() {
        let buffer = ReceiveBuffer::<255>::new();
        feed(&buffer, b"hello\r");
        assert_eq!(&buffer.take_line().unwrap()[..], b"hello");
        feed(&buffer, b"hi\r");
        assert_eq!(&buffer.take_line().unwrap()[..], b"hillo");
    }

    #[test]
    fn bare_terminator_gives_empty_line() {
        let buffer = ReceiveBuffer::<4>::new();
        buffer.push(CARRIAGE_RETURN);
        assert!(buffer.take_line().unwrap().is_empty());
    }

    #[test]
    fn clear_discards_pending_line() {
        let buffer = ReceiveBuffer::<4>::new();
        feed(&buffer, b"ab\rc");
        buffer.clear();
        assert!(!buffer.is_ready());
        assert_eq!(buffer.index(), 0);
        assert_eq!(buffer.contents(), [0; 4]);
        assert!(buffer.take_line().is_none());
    }
}
