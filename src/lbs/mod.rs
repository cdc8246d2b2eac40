//! The LED Button Service.
//!
//! [`LedButtonService`] ties together the pieces of the service:
//!
//! * the immutable attribute table ([`ServiceRegistry`]),
//! * the stored Button and LED values ([`AttributeValueStore`]),
//! * the access checks in front of the application ([`AccessController`]),
//! * the notification gate for the Sensor characteristic ([`SubscriptionGate`]),
//! * and the application's registration ([`CallbackBridge`]).
//!
//! # Dispatch
//!
//! The hosting stack routes ATT requests for handles in
//! `registry().service_handle()..=registry().end_handle()` to [`read`], [`write`] and
//! [`config_changed`]. All of them take `&mut self`, so the stack and the application have to
//! agree on who owns the service at any point in time (for example by making it a resource of
//! the task that runs the stack). Accesses are then serialized by construction.
//!
//! [`LedButtonService`]: struct.LedButtonService.html
//! [`ServiceRegistry`]: struct.ServiceRegistry.html
//! [`AttributeValueStore`]: struct.AttributeValueStore.html
//! [`AccessController`]: struct.AccessController.html
//! [`SubscriptionGate`]: struct.SubscriptionGate.html
//! [`CallbackBridge`]: struct.CallbackBridge.html
//! [`read`]: struct.LedButtonService.html#method.read
//! [`write`]: struct.LedButtonService.html#method.write
//! [`config_changed`]: struct.LedButtonService.html#method.config_changed

mod access;
mod callbacks;
mod notify;
mod registry;
mod store;
mod subscription;

pub use self::access::{AccessController, WriteError};
pub use self::callbacks::{CallbackBridge, Callbacks};
pub use self::notify::{NotificationEmitter, NotifyError, Transport};
pub use self::registry::{
    AttributeKind, Binding, CharacteristicId, Entry, RegistryBuilder, ServiceRegistry, BUTTON,
    LED, MAX_CHARACTERISTICS, SENSOR,
};
pub use self::store::AttributeValueStore;
pub use self::subscription::SubscriptionGate;

use crate::{
    att::{AttError, AttributeAccessPermissions, ErrorCode, Handle},
    bytes::{ByteReader, ByteWriter},
    gatt::{ClientConfig, ConnHandle, WriteFlags},
    Error, HexSlice,
};

/// One instance of the LED Button Service.
///
/// `L` and `B` are the application's LED and Button handlers, see [`Callbacks`].
///
/// [`Callbacks`]: struct.Callbacks.html
pub struct LedButtonService<L = fn(bool), B = fn() -> bool> {
    registry: ServiceRegistry,
    store: AttributeValueStore,
    gate: SubscriptionGate,
    callbacks: CallbackBridge<L, B>,
    sensor: NotificationEmitter,
}

impl<L: FnMut(bool), B: FnMut() -> bool> LedButtonService<L, B> {
    /// Creates the service with its primary service declaration at `first`.
    ///
    /// No application handlers are installed and notifications start out disabled.
    pub fn new(first: Handle) -> Result<Self, Error> {
        let registry = ServiceRegistry::led_button_service(first)?;
        let sensor = registry
            .entry(CharacteristicId::Sensor)
            .map(|entry| NotificationEmitter::new(entry.value))
            .ok_or(Error::InvalidValue)?;

        Ok(Self {
            registry,
            store: AttributeValueStore::new(),
            gate: SubscriptionGate::new(),
            callbacks: CallbackBridge::new(),
            sensor,
        })
    }

    /// Installs the application's handlers.
    ///
    /// `Some` replaces both handlers, even the one left unset in `callbacks`. `None` keeps the
    /// current registration. This never fails and may be called any number of times.
    pub fn initialize(&mut self, callbacks: Option<Callbacks<L, B>>) -> Result<(), Error> {
        self.callbacks.initialize(callbacks);
        info!(
            "LBS initialized (LED handler: {}, button handler: {})",
            self.callbacks.has_led_write(),
            self.callbacks.has_button_read()
        );
        Ok(())
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Whether a client enabled notifications for the Sensor characteristic.
    pub fn is_notify_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// The last LED state a client wrote.
    pub fn led_state(&self) -> bool {
        self.store.led()
    }

    /// Returns the access permissions of the attribute at `handle`, or `None` if the handle does
    /// not belong to this service.
    pub fn attr_access_permissions(&self, handle: Handle) -> Option<AttributeAccessPermissions> {
        self.registry.lookup(handle).map(|kind| kind.permissions())
    }

    /// Reads the attribute at `handle` into `buf`, starting at `offset` within the value.
    ///
    /// Returns the number of bytes read, which is at most `buf.len()`. An `offset` past the end of
    /// the value results in 0 bytes.
    pub fn read(
        &mut self,
        conn: ConnHandle,
        handle: Handle,
        buf: &mut [u8],
        offset: u16,
    ) -> Result<usize, AttError> {
        debug!("attribute read, handle: {:?}, {:?}", handle, conn);
        let kind = self
            .registry
            .lookup(handle)
            .ok_or_else(|| AttError::new(ErrorCode::InvalidHandle, handle))?;
        let unlikely = |_: Error| AttError::new(ErrorCode::UnlikelyError, handle);

        match kind {
            AttributeKind::PrimaryService => {
                let value = self.registry.service_value().map_err(unlikely)?;
                Ok(store::read_bounded(&value, buf, offset))
            }
            AttributeKind::Declaration(entry) => {
                let value = entry
                    .characteristic
                    .declaration(entry.value)
                    .map_err(unlikely)?;
                Ok(store::read_bounded(&value, buf, offset))
            }
            AttributeKind::Value(entry) if entry.binding == Binding::ButtonRead => {
                let mut access = AccessController::new(&mut self.store, &mut self.callbacks);
                Ok(access.handle_read(buf, offset))
            }
            AttributeKind::ClientConfig(entry) if entry.id == CharacteristicId::Sensor => {
                let value = self.gate.config().to_le_bytes();
                Ok(store::read_bounded(&value, buf, offset))
            }
            AttributeKind::Value(_) | AttributeKind::ClientConfig(_) => {
                Err(AttError::new(ErrorCode::ReadNotPermitted, handle))
            }
        }
    }

    /// Writes `data` to the attribute at `handle`.
    ///
    /// Returns the number of bytes consumed. A write flagged as [`WriteFlags::PREPARE`] is only
    /// validated, and consumes nothing.
    ///
    /// [`WriteFlags::PREPARE`]: ../gatt/struct.WriteFlags.html#associatedconstant.PREPARE
    pub fn write(
        &mut self,
        conn: ConnHandle,
        handle: Handle,
        data: &[u8],
        offset: u16,
        flags: WriteFlags,
    ) -> Result<usize, AttError> {
        debug!(
            "attribute write, handle: {:?}, {:?}, {:?} at offset {} ({:?})",
            handle,
            conn,
            HexSlice(data),
            offset,
            flags
        );
        let kind = self
            .registry
            .lookup(handle)
            .ok_or_else(|| AttError::new(ErrorCode::InvalidHandle, handle))?;
        let reject = |code: ErrorCode| AttError::new(code, handle);

        match kind {
            AttributeKind::Value(entry) if entry.binding == Binding::LedWrite => {
                if flags.contains(WriteFlags::PREPARE) {
                    AccessController::<L, B>::check_write(data, offset)
                        .map_err(|e| reject(e.into()))?;
                    return Ok(0);
                }

                let mut access = AccessController::new(&mut self.store, &mut self.callbacks);
                access
                    .handle_write(data, offset)
                    .map_err(|e| reject(e.into()))
            }
            AttributeKind::ClientConfig(entry) if entry.id == CharacteristicId::Sensor => {
                let value = check_cccd_write(data, offset).map_err(reject)?;
                if flags.contains(WriteFlags::PREPARE) {
                    return Ok(0);
                }

                self.gate.on_config_changed(value);
                Ok(data.len())
            }
            AttributeKind::PrimaryService
            | AttributeKind::Declaration(_)
            | AttributeKind::Value(_)
            | AttributeKind::ClientConfig(_) => Err(reject(ErrorCode::WriteNotPermitted)),
        }
    }

    /// Handles a CCCD change reported by a stack that manages CCCDs itself.
    ///
    /// `handle` may be either the Sensor CCCD or the Sensor value. Changes for other handles are
    /// ignored.
    pub fn config_changed(&mut self, handle: Handle, value: u16) {
        match self.registry.lookup(handle) {
            Some(AttributeKind::ClientConfig(entry)) | Some(AttributeKind::Value(entry))
                if entry.id == CharacteristicId::Sensor =>
            {
                self.gate.on_config_changed(value)
            }
            _ => warn!("config change for {:?} does not belong to a notifying value", handle),
        }
    }

    /// Notifies every connected client of a new sensor value.
    ///
    /// Fails with `NotifyError::NotSubscribed` (without involving `transport`) unless a client
    /// enabled notifications.
    pub fn notify_sensor_value<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        value: u32,
    ) -> Result<(), NotifyError<T::Error>> {
        self.send_sensor_value(transport, None, value)
    }

    /// Notifies the client on `conn` of a new sensor value.
    pub fn notify_sensor_value_to<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        conn: ConnHandle,
        value: u32,
    ) -> Result<(), NotifyError<T::Error>> {
        self.send_sensor_value(transport, Some(conn), value)
    }

    fn send_sensor_value<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        conn: Option<ConnHandle>,
        value: u32,
    ) -> Result<(), NotifyError<T::Error>> {
        let mut payload = [0; 4];
        // Cannot fail, the buffer fits a `u32`.
        let _ = ByteWriter::new(&mut payload).write_u32_le(value);
        self.sensor.notify(&self.gate, transport, conn, &payload)
    }
}

/// Validates a CCCD write and decodes the configuration value.
fn check_cccd_write(data: &[u8], offset: u16) -> Result<u16, ErrorCode> {
    if offset != 0 {
        return Err(ErrorCode::InvalidOffset);
    }
    if data.len() != 2 {
        return Err(ErrorCode::InvalidAttributeValueLength);
    }

    let value = ByteReader::new(data)
        .read_u16_le()
        .map_err(|_| ErrorCode::InvalidAttributeValueLength)?;
    match ClientConfig::from_bits(value) {
        Some(_) => Ok(value),
        None => Err(ErrorCode::ValueNotAllowed),
    }
}
