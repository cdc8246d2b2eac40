//! Application hooks for the Button and LED characteristics.

use core::fmt;

/// Handlers the application installs for the service.
///
/// Each direction is either installed or not. A missing LED handler means writes are validated
/// and then dropped; a missing Button handler means reads return no data.
///
/// The type parameters default to plain function pointers, which is what [`Callbacks::new`]
/// starts out with. Installing a closure changes the corresponding parameter.
///
/// [`Callbacks::new`]: #method.new
pub struct Callbacks<L = fn(bool), B = fn() -> bool> {
    led_write: Option<L>,
    button_read: Option<B>,
}

impl Callbacks {
    /// Creates a set of callbacks with no handler installed.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L, B> Callbacks<L, B> {
    /// Installs the handler called with the requested LED state after a valid write.
    pub fn on_led_write<F: FnMut(bool)>(self, f: F) -> Callbacks<F, B> {
        Callbacks {
            led_write: Some(f),
            button_read: self.button_read,
        }
    }

    /// Installs the handler queried for the button state on every read.
    pub fn on_button_read<F: FnMut() -> bool>(self, f: F) -> Callbacks<L, F> {
        Callbacks {
            led_write: self.led_write,
            button_read: Some(f),
        }
    }
}

impl<L, B> Default for Callbacks<L, B> {
    fn default() -> Self {
        Self {
            led_write: None,
            button_read: None,
        }
    }
}

impl<L, B> fmt::Debug for Callbacks<L, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("led_write", &self.led_write.is_some())
            .field("button_read", &self.button_read.is_some())
            .finish()
    }
}

/// Owns the application's registration and invokes it on behalf of the access controller.
pub struct CallbackBridge<L, B> {
    callbacks: Callbacks<L, B>,
}

impl<L: FnMut(bool), B: FnMut() -> bool> CallbackBridge<L, B> {
    pub fn new() -> Self {
        Self {
            callbacks: Callbacks::default(),
        }
    }

    /// Replaces the registration with `callbacks` as a whole.
    ///
    /// Passing `None` keeps the current registration.
    pub fn initialize(&mut self, callbacks: Option<Callbacks<L, B>>) {
        if let Some(callbacks) = callbacks {
            debug!("installing {:?}", callbacks);
            self.callbacks = callbacks;
        }
    }

    pub fn has_led_write(&self) -> bool {
        self.callbacks.led_write.is_some()
    }

    pub fn has_button_read(&self) -> bool {
        self.callbacks.button_read.is_some()
    }

    /// Calls the LED handler, if installed. Returns whether it was called.
    pub fn led_write(&mut self, on: bool) -> bool {
        match &mut self.callbacks.led_write {
            Some(f) => {
                f(on);
                true
            }
            None => false,
        }
    }

    /// Queries the button state from the application, if a handler is installed.
    pub fn button_read(&mut self) -> Option<bool> {
        self.callbacks.button_read.as_mut().map(|f| f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn empty_bridge() {
        let mut bridge: CallbackBridge<fn(bool), fn() -> bool> = CallbackBridge::new();
        assert!(!bridge.has_led_write());
        assert!(!bridge.led_write(true));
        assert_eq!(bridge.button_read(), None);
    }

    #[test]
    fn none_keeps_registration() {
        let calls = Cell::new(0);
        let mut bridge = CallbackBridge::new();
        bridge.initialize(Some(
            Callbacks::new()
                .on_led_write(|_| calls.set(calls.get() + 1))
                .on_button_read(|| true),
        ));
        bridge.initialize(None);

        assert!(bridge.led_write(false));
        assert_eq!(calls.get(), 1);
        assert_eq!(bridge.button_read(), Some(true));
    }

    #[test]
    fn reinitialize_replaces_both() {
        fn led(_: bool) {}
        fn pressed() -> bool {
            true
        }

        let mut bridge: CallbackBridge<fn(bool), fn() -> bool> = CallbackBridge::new();
        bridge.initialize(Some(Callbacks {
            led_write: Some(led as fn(bool)),
            button_read: Some(pressed as fn() -> bool),
        }));
        assert!(bridge.has_led_write());
        assert!(bridge.has_button_read());

        // Only the LED handler this time, the button handler must be gone.
        bridge.initialize(Some(Callbacks::new().on_led_write(led as fn(bool))));
        assert!(bridge.has_led_write());
        assert!(!bridge.has_button_read());
        assert_eq!(bridge.button_read(), None);
    }
}
