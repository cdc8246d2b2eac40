//! Current values backing the service's characteristics.

use core::cmp;

/// Value storage for the Button and LED characteristics.
///
/// The Sensor characteristic has no stored value. Its value only exists in the notification that
/// carries it.
#[derive(Debug, Default)]
pub struct AttributeValueStore {
    button: [u8; 1],
    led: [u8; 1],
}

impl AttributeValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoded Button value (`0x00` released, `0x01` pressed).
    pub fn button(&self) -> &[u8] {
        &self.button
    }

    pub fn set_button(&mut self, pressed: bool) {
        self.button = [u8::from(pressed)];
    }

    /// The last LED state accepted from a client.
    pub fn led(&self) -> bool {
        self.led[0] == 0x01
    }

    pub fn set_led(&mut self, on: bool) {
        self.led = [u8::from(on)];
    }
}

/// Copies the part of `value` starting at `offset` into `buf`, returning the number of bytes
/// copied.
///
/// At most `buf.len()` bytes are copied. An `offset` at or beyond the end of `value` copies
/// nothing; this is not an error.
pub fn read_bounded(value: &[u8], buf: &mut [u8], offset: u16) -> usize {
    let offset = usize::from(offset);
    if offset >= value.len() {
        return 0;
    }

    let rest = &value[offset..];
    let len = cmp::min(buf.len(), rest.len());
    buf[..len].copy_from_slice(&rest[..len]);
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_reads() {
        let value = [1, 2, 3, 4];
        let mut buf = [0; 8];
        assert_eq!(read_bounded(&value, &mut buf, 0), 4);
        assert_eq!(&buf[..4], &value);

        let mut small = [0; 2];
        assert_eq!(read_bounded(&value, &mut small, 1), 2);
        assert_eq!(small, [2, 3]);

        assert_eq!(read_bounded(&value, &mut buf, 4), 0);
        assert_eq!(read_bounded(&value, &mut buf, 0xFFFF), 0);
        assert_eq!(read_bounded(&value, &mut [], 0), 0);
    }

    #[test]
    fn store_encodes_booleans() {
        let mut store = AttributeValueStore::new();
        assert_eq!(store.button(), &[0x00]);
        assert!(!store.led());

        store.set_button(true);
        store.set_led(true);
        assert_eq!(store.button(), &[0x01]);
        assert!(store.led());
    }
}
