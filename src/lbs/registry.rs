//! The declarative attribute table of the service.
//!
//! A [`RegistryBuilder`] assigns handles and checks that every characteristic is bound to a
//! handler its properties allow. The resulting [`ServiceRegistry`] is immutable and is what the
//! hosting stack consults to route attribute accesses.
//!
//! [`RegistryBuilder`]: struct.RegistryBuilder.html
//! [`ServiceRegistry`]: struct.ServiceRegistry.html

use crate::{
    att::{AttUuid, AttributeAccessPermissions, Handle},
    bytes::{ByteWriter, ToBytes},
    gatt::{self, Characteristic, Properties},
    uuid::{self, Uuid128},
    Error,
};
use heapless::Vec;

/// Maximum number of characteristics a registry can hold.
pub const MAX_CHARACTERISTICS: usize = 3;

/// The Button characteristic: 1 byte, read only.
pub const BUTTON: Characteristic = Characteristic::new(uuid::LBS_BUTTON, Properties::READ, 1);

/// The LED characteristic: 1 byte, write only.
pub const LED: Characteristic = Characteristic::new(uuid::LBS_LED, Properties::WRITE, 1);

/// The Sensor characteristic: 4 bytes, notify only.
pub const SENSOR: Characteristic = Characteristic::new(uuid::LBS_SENSOR, Properties::NOTIFY, 4);

/// Identifies a characteristic independently of the handles it was assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharacteristicId {
    Button,
    Led,
    Sensor,
}

/// The handler an access to a characteristic's value is routed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Binding {
    /// No access handler. Only legal for characteristics that are neither readable nor writeable.
    None,
    /// Reads are answered by asking the application for the button state.
    ButtonRead,
    /// Writes are validated and forwarded to the application's LED handler.
    LedWrite,
}

impl Binding {
    fn is_legal_for(&self, properties: Properties) -> bool {
        let readable = properties.contains(Properties::READ);
        let writeable = properties.is_writeable();
        match self {
            Binding::None => !readable && !writeable,
            Binding::ButtonRead => readable && !writeable,
            Binding::LedWrite => writeable && !readable,
        }
    }
}

/// A registered characteristic and the handles assigned to it.
#[derive(Debug, Copy, Clone)]
pub struct Entry {
    pub id: CharacteristicId,
    pub characteristic: Characteristic,
    pub binding: Binding,
    /// Handle of the characteristic declaration.
    pub declaration: Handle,
    /// Handle of the value attribute.
    pub value: Handle,
    /// Handle of the CCCD, if the characteristic notifies or indicates.
    pub cccd: Option<Handle>,
}

/// What an attribute handle refers to.
#[derive(Debug, Copy, Clone)]
pub enum AttributeKind<'a> {
    PrimaryService,
    Declaration(&'a Entry),
    Value(&'a Entry),
    ClientConfig(&'a Entry),
}

impl AttributeKind<'_> {
    /// The attribute type, as used in discovery.
    pub fn att_type(&self) -> AttUuid {
        match self {
            AttributeKind::PrimaryService => gatt::PRIMARY_SERVICE.into(),
            AttributeKind::Declaration(_) => gatt::CHARACTERISTIC.into(),
            AttributeKind::Value(entry) => entry.characteristic.uuid.into(),
            AttributeKind::ClientConfig(_) => gatt::CLIENT_CHARACTERISTIC_CONFIGURATION.into(),
        }
    }

    pub fn permissions(&self) -> AttributeAccessPermissions {
        match self {
            AttributeKind::PrimaryService | AttributeKind::Declaration(_) => {
                AttributeAccessPermissions::Readable
            }
            AttributeKind::Value(entry) => entry.characteristic.properties.value_permissions(),
            AttributeKind::ClientConfig(_) => AttributeAccessPermissions::ReadableAndWriteable,
        }
    }
}

/// Builds a [`ServiceRegistry`].
///
/// [`ServiceRegistry`]: struct.ServiceRegistry.html
#[derive(Debug)]
pub struct RegistryBuilder {
    uuid: Uuid128,
    service: Handle,
    next: Option<Handle>,
    entries: Vec<Entry, MAX_CHARACTERISTICS>,
}

impl RegistryBuilder {
    /// Starts a service with the given UUID whose declaration sits at `first`.
    ///
    /// Returns `Error::InvalidValue` if `first` is the `NULL` handle.
    pub fn new(uuid: Uuid128, first: Handle) -> Result<Self, Error> {
        if first == Handle::NULL {
            return Err(Error::InvalidValue);
        }

        Ok(Self {
            uuid,
            service: first,
            next: first.next(),
            entries: Vec::new(),
        })
    }

    fn allocate(&mut self) -> Result<Handle, Error> {
        let handle = self.next.ok_or(Error::InvalidValue)?;
        self.next = handle.next();
        Ok(handle)
    }

    /// Appends a characteristic, assigning handles for its declaration, its value, and its CCCD
    /// (if it notifies or indicates).
    pub fn characteristic(
        mut self,
        id: CharacteristicId,
        characteristic: Characteristic,
        binding: Binding,
    ) -> Result<Self, Error> {
        if !binding.is_legal_for(characteristic.properties) {
            warn!(
                "{:?}: binding {:?} not allowed for {:?}",
                id, binding, characteristic.properties
            );
            return Err(Error::InvalidValue);
        }
        if self.entries.iter().any(|entry| entry.id == id) {
            return Err(Error::InvalidValue);
        }

        let declaration = self.allocate()?;
        let value = self.allocate()?;
        let cccd = if characteristic.properties.needs_cccd() {
            Some(self.allocate()?)
        } else {
            None
        };

        let entry = Entry {
            id,
            characteristic,
            binding,
            declaration,
            value,
            cccd,
        };
        self.entries.push(entry).map_err(|_| Error::Eof)?;
        Ok(self)
    }

    pub fn build(self) -> ServiceRegistry {
        let end = self
            .entries
            .last()
            .map(|entry| entry.cccd.unwrap_or(entry.value))
            .unwrap_or(self.service);

        ServiceRegistry {
            uuid: self.uuid,
            service: self.service,
            end,
            entries: self.entries,
        }
    }
}

/// The immutable attribute table of one service instance.
#[derive(Debug)]
pub struct ServiceRegistry {
    uuid: Uuid128,
    service: Handle,
    end: Handle,
    entries: Vec<Entry, MAX_CHARACTERISTICS>,
}

impl ServiceRegistry {
    /// Builds the LED Button Service table with the service declaration at `first`.
    ///
    /// | Handle      | Attribute                    |
    /// |-------------|------------------------------|
    /// | `first`     | Primary Service              |
    /// | `first + 1` | Button declaration           |
    /// | `first + 2` | Button value (read)          |
    /// | `first + 3` | LED declaration              |
    /// | `first + 4` | LED value (write)            |
    /// | `first + 5` | Sensor declaration           |
    /// | `first + 6` | Sensor value (notify)        |
    /// | `first + 7` | Sensor CCCD                  |
    pub fn led_button_service(first: Handle) -> Result<Self, Error> {
        Ok(RegistryBuilder::new(uuid::LBS_SERVICE, first)?
            .characteristic(CharacteristicId::Button, BUTTON, Binding::ButtonRead)?
            .characteristic(CharacteristicId::Led, LED, Binding::LedWrite)?
            .characteristic(CharacteristicId::Sensor, SENSOR, Binding::None)?
            .build())
    }

    pub fn uuid(&self) -> Uuid128 {
        self.uuid
    }

    /// Handle of the primary service declaration.
    pub fn service_handle(&self) -> Handle {
        self.service
    }

    /// Last handle belonging to the service.
    pub fn end_handle(&self) -> Handle {
        self.end
    }

    /// The value of the primary service declaration (the service UUID, little-endian).
    pub fn service_value(&self) -> Result<[u8; 16], Error> {
        let mut buf = [0; 16];
        self.uuid.to_bytes(&mut ByteWriter::new(&mut buf))?;
        Ok(buf)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: CharacteristicId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Resolves a handle to the attribute it refers to.
    pub fn lookup(&self, handle: Handle) -> Option<AttributeKind<'_>> {
        if handle == self.service {
            return Some(AttributeKind::PrimaryService);
        }

        self.entries.iter().find_map(|entry| {
            if handle == entry.declaration {
                Some(AttributeKind::Declaration(entry))
            } else if handle == entry.value {
                Some(AttributeKind::Value(entry))
            } else if Some(handle) == entry.cccd {
                Some(AttributeKind::ClientConfig(entry))
            } else {
                None
            }
        })
    }

    /// Calls `f` for every attribute, in ascending handle order.
    ///
    /// Stops at and returns the first error returned by `f`.
    pub fn for_each_attr<E>(
        &self,
        mut f: impl FnMut(Handle, AttributeKind<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        f(self.service, AttributeKind::PrimaryService)?;
        for entry in &self.entries {
            f(entry.declaration, AttributeKind::Declaration(entry))?;
            f(entry.value, AttributeKind::Value(entry))?;
            if let Some(cccd) = entry.cccd {
                f(cccd, AttributeKind::ClientConfig(entry))?;
            }
        }
        Ok(())
    }
}
