//! Generic Attribute Profile (GATT) declarations.
//!
//! GATT organizes attributes into *services* and *characteristics*. A service starts with a
//! *Primary Service* declaration whose value is the service UUID. Each characteristic then
//! contributes a *Characteristic* declaration (properties, value handle, UUID), the value
//! attribute itself, and, if it can notify or indicate, a *Client Characteristic Configuration*
//! descriptor (CCCD) through which a client subscribes.

mod characteristic;

pub use self::characteristic::{Characteristic, Properties, DECLARATION_LEN};

use crate::uuid::Uuid16;
use bitflags::bitflags;
use core::fmt;

/// Attribute type of a primary service declaration.
pub const PRIMARY_SERVICE: Uuid16 = Uuid16(0x2800);

/// Attribute type of a characteristic declaration.
pub const CHARACTERISTIC: Uuid16 = Uuid16(0x2803);

/// Attribute type of a Client Characteristic Configuration descriptor.
pub const CLIENT_CHARACTERISTIC_CONFIGURATION: Uuid16 = Uuid16(0x2902);

bitflags! {
    /// Value of a Client Characteristic Configuration descriptor.
    pub struct ClientConfig: u16 {
        const NOTIFY   = 0x0001;
        const INDICATE = 0x0002;
    }
}

bitflags! {
    /// Flags passed along with an attribute write by the hosting stack.
    pub struct WriteFlags: u8 {
        /// The write is the authorization phase of a *Prepare Write Request*. The value will be
        /// written for real once the client executes the queue.
        const PREPARE = 0x01;
        /// The write came from a *Write Command* and will not be answered.
        const CMD     = 0x02;
        /// The write is the execution of a previously prepared write.
        const EXECUTE = 0x04;
    }
}

/// Opaque identifier of a connection, assigned by the hosting stack.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ConnHandle(pub u16);

impl fmt::Debug for ConnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}
