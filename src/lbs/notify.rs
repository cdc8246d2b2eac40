//! Server-initiated value updates.

use super::subscription::SubscriptionGate;
use crate::{att::Handle, gatt::ConnHandle, HexSlice};
use core::fmt;

/// The hosting stack's primitive for sending a *Handle Value Notification*.
///
/// Notifications are not acknowledged by the client, so a successful return only means the stack
/// accepted the packet for transmission.
pub trait Transport {
    /// Error reported by the stack, eg. when the link is gone or its TX queue is full.
    type Error;

    /// Sends `value` as a notification of the attribute at `handle`.
    ///
    /// If `conn` is `None`, the notification goes to every connected client.
    fn notify(
        &mut self,
        conn: Option<ConnHandle>,
        handle: Handle,
        value: &[u8],
    ) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &'_ mut T {
    type Error = T::Error;

    fn notify(
        &mut self,
        conn: Option<ConnHandle>,
        handle: Handle,
        value: &[u8],
    ) -> Result<(), Self::Error> {
        (**self).notify(conn, handle, value)
    }
}

/// Error returned when sending a notification fails.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotifyError<E> {
    /// No client has enabled notifications. Access is denied without contacting the stack.
    NotSubscribed,
    /// The stack failed to send the notification.
    Transport(E),
}

impl<E: fmt::Debug> fmt::Display for NotifyError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::NotSubscribed => f.write_str("notifications not enabled by client"),
            NotifyError::Transport(e) => write!(f, "transport error: {:?}", e),
        }
    }
}

/// Pushes value updates of one characteristic to subscribed clients.
#[derive(Debug, Copy, Clone)]
pub struct NotificationEmitter {
    handle: Handle,
}

impl NotificationEmitter {
    /// Creates an emitter for the value attribute at `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// The value attribute notifications are sent for.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Sends `value` verbatim, if `gate` is open.
    pub fn notify<T: Transport + ?Sized>(
        &self,
        gate: &SubscriptionGate,
        transport: &mut T,
        conn: Option<ConnHandle>,
        value: &[u8],
    ) -> Result<(), NotifyError<T::Error>> {
        if !gate.is_enabled() {
            trace!("notify {:?}: not subscribed", self.handle);
            return Err(NotifyError::NotSubscribed);
        }

        trace!("notify {:?} <- {:?}", self.handle, HexSlice(value));
        transport
            .notify(conn, self.handle, value)
            .map_err(NotifyError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<(Option<ConnHandle>, Handle, Vec<u8>)>,
    }

    impl Transport for Recorder {
        type Error = ();

        fn notify(
            &mut self,
            conn: Option<ConnHandle>,
            handle: Handle,
            value: &[u8],
        ) -> Result<(), ()> {
            self.sent.push((conn, handle, value.to_vec()));
            Ok(())
        }
    }

    struct Disconnected;

    impl Transport for Disconnected {
        type Error = &'static str;

        fn notify(&mut self, _: Option<ConnHandle>, _: Handle, _: &[u8]) -> Result<(), Self::Error> {
            Err("not connected")
        }
    }

    #[test]
    fn closed_gate_skips_transport() {
        let emitter = NotificationEmitter::new(Handle::from_raw(7));
        let gate = SubscriptionGate::new();
        let mut tx = Recorder::default();

        assert_eq!(
            emitter.notify(&gate, &mut tx, None, &[1, 2, 3, 4]),
            Err(NotifyError::NotSubscribed)
        );
        assert!(tx.sent.is_empty());
    }

    #[test]
    fn open_gate_forwards_verbatim() {
        let emitter = NotificationEmitter::new(Handle::from_raw(7));
        let mut gate = SubscriptionGate::new();
        gate.on_config_changed(0x0001);
        let mut tx = Recorder::default();

        emitter
            .notify(&gate, &mut tx, Some(ConnHandle(3)), &[0xAA, 0x55])
            .unwrap();
        assert_eq!(
            tx.sent,
            vec![(Some(ConnHandle(3)), Handle::from_raw(7), vec![0xAA, 0x55])]
        );
    }

    #[test]
    fn transport_errors_pass_through() {
        let emitter = NotificationEmitter::new(Handle::from_raw(7));
        let mut gate = SubscriptionGate::new();
        gate.on_config_changed(0x0001);

        assert_eq!(
            emitter.notify(&gate, &mut Disconnected, None, &[0]),
            Err(NotifyError::Transport("not connected"))
        );
    }
}
