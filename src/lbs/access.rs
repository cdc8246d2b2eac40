//! Validation of client reads and writes before they reach the application.

use super::{
    callbacks::CallbackBridge,
    store::{self, AttributeValueStore},
};
use crate::{att::ErrorCode, HexSlice};
use core::fmt;

/// Reasons for rejecting a write to the LED characteristic.
///
/// All of them are detected before anything is stored or the application is called.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The value is not exactly 1 byte long.
    InvalidLength,
    /// The write starts at a non-zero offset. Partial and long writes are not supported.
    InvalidOffset,
    /// The byte is neither `0x00` nor `0x01`.
    ValueNotAllowed,
}

impl From<WriteError> for ErrorCode {
    fn from(e: WriteError) -> Self {
        match e {
            WriteError::InvalidLength => ErrorCode::InvalidAttributeValueLength,
            WriteError::InvalidOffset => ErrorCode::InvalidOffset,
            WriteError::ValueNotAllowed => ErrorCode::ValueNotAllowed,
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteError::InvalidLength => "incorrect data length",
            WriteError::InvalidOffset => "incorrect data offset",
            WriteError::ValueNotAllowed => "incorrect value",
        })
    }
}

/// Width of the Button and LED values.
const VALUE_WIDTH: usize = 1;

/// Gatekeeper between the hosting stack and the application for the Button and LED values.
pub struct AccessController<'a, L, B> {
    store: &'a mut AttributeValueStore,
    callbacks: &'a mut CallbackBridge<L, B>,
}

impl<'a, L: FnMut(bool), B: FnMut() -> bool> AccessController<'a, L, B> {
    pub fn new(
        store: &'a mut AttributeValueStore,
        callbacks: &'a mut CallbackBridge<L, B>,
    ) -> Self {
        Self { store, callbacks }
    }

    /// Checks an LED write without applying it, returning the requested LED state.
    pub fn check_write(value: &[u8], offset: u16) -> Result<bool, WriteError> {
        if value.len() != VALUE_WIDTH {
            return Err(WriteError::InvalidLength);
        }
        if offset != 0 {
            return Err(WriteError::InvalidOffset);
        }

        match value[0] {
            0x00 => Ok(false),
            0x01 => Ok(true),
            _ => Err(WriteError::ValueNotAllowed),
        }
    }

    /// Validates and applies a write to the LED value.
    ///
    /// On success, the LED handler (if installed) is called exactly once, and the number of bytes
    /// consumed is returned.
    pub fn handle_write(&mut self, value: &[u8], offset: u16) -> Result<usize, WriteError> {
        let on = Self::check_write(value, offset).map_err(|e| {
            debug!("write LED: {} ({:?} at offset {})", e, HexSlice(value), offset);
            e
        })?;

        self.store.set_led(on);
        if !self.callbacks.led_write(on) {
            trace!("write LED: no handler installed, dropping");
        }
        Ok(value.len())
    }

    /// Reads the Button value into `buf`, returning the number of bytes read.
    ///
    /// The application is asked for the current state first. Without a Button handler, the read
    /// yields no data.
    pub fn handle_read(&mut self, buf: &mut [u8], offset: u16) -> usize {
        match self.callbacks.button_read() {
            Some(pressed) => {
                self.store.set_button(pressed);
                store::read_bounded(self.store.button(), buf, offset)
            }
            None => {
                trace!("read button: no handler installed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lbs::callbacks::Callbacks;
    use std::cell::RefCell;

    #[test]
    fn rejects_bad_writes_without_side_effects() {
        let calls = RefCell::new(Vec::new());
        let mut store = AttributeValueStore::new();
        let mut bridge = CallbackBridge::new();
        bridge.initialize(Some(
            Callbacks::new().on_led_write(|on| calls.borrow_mut().push(on)),
        ));
        let mut access = AccessController::new(&mut store, &mut bridge);

        assert_eq!(access.handle_write(&[], 0), Err(WriteError::InvalidLength));
        assert_eq!(
            access.handle_write(&[0x01, 0x00], 0),
            Err(WriteError::InvalidLength)
        );
        assert_eq!(access.handle_write(&[0x01], 1), Err(WriteError::InvalidOffset));
        for byte in 0x02..=0xFF {
            assert_eq!(
                access.handle_write(&[byte], 0),
                Err(WriteError::ValueNotAllowed)
            );
        }

        drop(access);
        assert!(calls.borrow().is_empty());
        assert!(!store.led());
    }

    #[test]
    fn length_is_checked_before_offset() {
        type Access<'a> = AccessController<'a, fn(bool), fn() -> bool>;
        assert_eq!(Access::check_write(&[0x05, 0x06], 3), Err(WriteError::InvalidLength));
        assert_eq!(Access::check_write(&[0x05], 3), Err(WriteError::InvalidOffset));
    }

    #[test]
    fn valid_writes_call_handler_once() {
        let calls = RefCell::new(Vec::new());
        let mut store = AttributeValueStore::new();
        let mut bridge = CallbackBridge::new();
        bridge.initialize(Some(
            Callbacks::new().on_led_write(|on| calls.borrow_mut().push(on)),
        ));
        let mut access = AccessController::new(&mut store, &mut bridge);

        assert_eq!(access.handle_write(&[0x01], 0), Ok(1));
        assert_eq!(&*calls.borrow(), &[true]);
        assert_eq!(access.handle_write(&[0x00], 0), Ok(1));
        assert_eq!(&*calls.borrow(), &[true, false]);
    }

    #[test]
    fn write_without_handler_is_accepted() {
        let mut store = AttributeValueStore::new();
        let mut bridge: CallbackBridge<fn(bool), fn() -> bool> = CallbackBridge::new();
        let mut access = AccessController::new(&mut store, &mut bridge);

        assert_eq!(access.handle_write(&[0x01], 0), Ok(1));
        assert_eq!(access.handle_write(&[0x07], 0), Err(WriteError::ValueNotAllowed));
        drop(access);
        assert!(store.led());
    }

    #[test]
    fn read_without_handler_is_empty() {
        let mut store = AttributeValueStore::new();
        let mut bridge: CallbackBridge<fn(bool), fn() -> bool> = CallbackBridge::new();
        let mut access = AccessController::new(&mut store, &mut bridge);

        let mut buf = [0xAA; 4];
        for offset in 0..3 {
            assert_eq!(access.handle_read(&mut buf, offset), 0);
            assert_eq!(access.handle_read(&mut buf[..1], offset), 0);
        }
        assert_eq!(buf, [0xAA; 4]);
    }

    #[test]
    fn read_refreshes_button() {
        let pressed = RefCell::new(true);
        let mut store = AttributeValueStore::new();
        let mut bridge = CallbackBridge::new();
        bridge.initialize(Some(Callbacks::new().on_button_read(|| *pressed.borrow())));
        let mut access = AccessController::new(&mut store, &mut bridge);

        let mut buf = [0; 1];
        assert_eq!(access.handle_read(&mut buf, 0), 1);
        assert_eq!(buf, [0x01]);

        *pressed.borrow_mut() = false;
        assert_eq!(access.handle_read(&mut buf, 0), 1);
        assert_eq!(buf, [0x00]);

        // Past the 1-byte value: nothing, but no error either.
        assert_eq!(access.handle_read(&mut buf, 1), 0);
    }
}
