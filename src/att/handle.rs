//! Attribute handles.

use crate::{bytes::*, Error};
use core::fmt;

/// A 16-bit handle uniquely identifying an attribute on an ATT server.
///
/// Handles are assigned by the stack hosting the attribute table. The `0x0000` handle (`NULL`) is
/// invalid and never refers to an attribute.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Handle(u16);

impl Handle {
    /// Placeholder used where no attribute handle applies (eg. in error responses).
    pub const NULL: Self = Handle(0x0000);

    /// Creates an attribute handle from a raw `u16`.
    pub const fn from_raw(raw: u16) -> Self {
        Handle(raw)
    }

    /// Returns the raw 16-bit integer representing this handle.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the handle following `self`, or `None` if the handle space is exhausted.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Handle)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

impl FromBytes<'_> for Handle {
    fn from_bytes(bytes: &mut ByteReader<'_>) -> Result<Self, Error> {
        Ok(Handle(bytes.read_u16_le()?))
    }
}

impl ToBytes for Handle {
    fn to_bytes(&self, writer: &mut ByteWriter<'_>) -> Result<(), Error> {
        writer.write_u16_le(self.0)
    }
}
