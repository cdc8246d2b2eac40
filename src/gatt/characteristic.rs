use crate::{
    att::{AttributeAccessPermissions, Handle},
    bytes::*,
    uuid::Uuid128,
    Error,
};
use bitflags::bitflags;

bitflags! {
    /// Characteristic properties, as advertised in the characteristic declaration.
    pub struct Properties: u8 {
        const BROADCAST    = 0x01;
        const READ         = 0x02;
        const WRITE_NO_RSP = 0x04;
        const WRITE        = 0x08;
        const NOTIFY       = 0x10;
        const INDICATE     = 0x20;
        const AUTH_WRITES  = 0x40;
        const EXTENDED     = 0x80;
    }
}

impl Properties {
    /// Whether a client may write the value attribute.
    pub fn is_writeable(&self) -> bool {
        self.intersects(Properties::WRITE | Properties::WRITE_NO_RSP | Properties::AUTH_WRITES)
    }

    /// Whether the characteristic needs a Client Characteristic Configuration descriptor.
    pub fn needs_cccd(&self) -> bool {
        self.intersects(Properties::NOTIFY | Properties::INDICATE)
    }

    /// The access permissions of the characteristic's value attribute.
    pub fn value_permissions(&self) -> AttributeAccessPermissions {
        match (self.contains(Properties::READ), self.is_writeable()) {
            (true, true) => AttributeAccessPermissions::ReadableAndWriteable,
            (true, false) => AttributeAccessPermissions::Readable,
            (false, true) => AttributeAccessPermissions::Writeable,
            (false, false) => AttributeAccessPermissions::Inaccessible,
        }
    }
}

/// A fixed-width characteristic value with a vendor UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Characteristic {
    pub uuid: Uuid128,
    pub properties: Properties,
    /// Width of the value in bytes.
    pub value_width: usize,
}

/// Size of a characteristic declaration value with a 128-bit UUID.
pub const DECLARATION_LEN: usize = 1 + 2 + 16;

impl Characteristic {
    pub const fn new(uuid: Uuid128, properties: Properties, value_width: usize) -> Self {
        Self {
            uuid,
            properties,
            value_width,
        }
    }

    /// Encodes the value of the characteristic declaration attribute (type `0x2803`).
    ///
    /// ```notrust
    /// +------------+--------------+----------------+
    /// | Properties | Value Handle | UUID           |
    /// | 1 octet    | 2 octets, LE | 16 octets, LE  |
    /// +------------+--------------+----------------+
    /// ```
    pub fn declaration(&self, value_handle: Handle) -> Result<[u8; DECLARATION_LEN], Error> {
        let mut buf = [0; DECLARATION_LEN];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u8(self.properties.bits())?;
        value_handle.to_bytes(&mut writer)?;
        self.uuid.to_bytes(&mut writer)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uuid::LBS_BUTTON;

    #[test]
    fn declaration_layout() {
        let button = Characteristic::new(LBS_BUTTON, Properties::READ, 1);
        let decl = button.declaration(Handle::from_raw(0x0003)).unwrap();
        assert_eq!(decl[0], 0x02);
        assert_eq!(&decl[1..3], &[0x03, 0x00]);
        assert_eq!(decl[3], 0x23);
        assert_eq!(&decl[15..17], &[0x24, 0x15]);
        assert_eq!(&decl[17..], &[0x00, 0x00]);
    }

    #[test]
    fn value_permissions() {
        assert_eq!(
            Properties::READ.value_permissions(),
            AttributeAccessPermissions::Readable
        );
        assert_eq!(
            Properties::WRITE.value_permissions(),
            AttributeAccessPermissions::Writeable
        );
        assert_eq!(
            (Properties::READ | Properties::WRITE_NO_RSP).value_permissions(),
            AttributeAccessPermissions::ReadableAndWriteable
        );
        assert_eq!(
            Properties::NOTIFY.value_permissions(),
            AttributeAccessPermissions::Inaccessible
        );
        assert!(Properties::NOTIFY.needs_cccd());
        assert!(!Properties::READ.needs_cccd());
    }
}
