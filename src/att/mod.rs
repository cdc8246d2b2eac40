//! Attribute Protocol (ATT) types shared with the hosting stack.
//!
//! The ATT server itself lives in the BLE stack embedding this service. What the service needs
//! from ATT is only the vocabulary both sides agree on:
//!
//! * A 16-bit *Attribute Handle* ([`Handle`]) uniquely identifying an attribute.
//! * A 16- or 128-bit UUID identifying the attribute type ([`AttUuid`]).
//! * Whether an attribute may be read and/or written ([`AttributeAccessPermissions`]).
//! * The error code sent back when a request is rejected ([`ErrorCode`], [`AttError`]).
//!
//! [`Handle`]: struct.Handle.html
//! [`AttUuid`]: enum.AttUuid.html
//! [`AttributeAccessPermissions`]: enum.AttributeAccessPermissions.html
//! [`ErrorCode`]: enum.ErrorCode.html
//! [`AttError`]: struct.AttError.html

mod handle;
mod uuid;

pub use self::handle::Handle;
pub use self::uuid::AttUuid;

use core::fmt;

enum_with_unknown! {
    /// Error codes that can be sent from the ATT server to the client in response to a request.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum ErrorCode(u8) {
        /// Attempted to use a `Handle` that isn't valid on this server.
        InvalidHandle = 0x01,
        /// Attribute isn't readable.
        ReadNotPermitted = 0x02,
        /// Attribute isn't writable.
        WriteNotPermitted = 0x03,
        /// Attribute PDU is invalid.
        InvalidPdu = 0x04,
        /// Authentication needed before attribute can be read/written.
        InsufficientAuthentication = 0x05,
        /// Server doesn't support this operation.
        RequestNotSupported = 0x06,
        /// Offset was past the end of the attribute, or not supported for it.
        InvalidOffset = 0x07,
        /// Authorization needed before attribute can be read/written.
        InsufficientAuthorization = 0x08,
        /// Too many "prepare write" requests have been queued.
        PrepareQueueFull = 0x09,
        /// No attribute found within the specified attribute handle range.
        AttributeNotFound = 0x0A,
        /// Attribute can't be read/written using *Read Blob* request.
        AttributeNotLong = 0x0B,
        /// Attribute value has an incorrect length for the operation.
        InvalidAttributeValueLength = 0x0D,
        /// Request has encountered an "unlikely" error and could not be completed.
        UnlikelyError = 0x0E,
        /// Attribute cannot be read/written without an encrypted connection.
        InsufficientEncryption = 0x0F,
        /// Server didn't have enough resources to complete a request.
        InsufficientResources = 0x11,
        /// The written value is outside of the attribute's allowed value domain.
        ValueNotAllowed = 0x13,
    }
}

/// An error on the ATT protocol layer. Sent back to the client by the hosting stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttError {
    code: ErrorCode,
    handle: Handle,
}

impl AttError {
    pub fn new(code: ErrorCode, handle: Handle) -> Self {
        Self { code, handle }
    }

    /// The error code to put in the *Error Response*.
    pub fn error_code(&self) -> ErrorCode {
        self.code
    }

    /// The handle of the attribute that caused the error.
    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl fmt::Display for AttError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ATT error {:#04x} ({:?}) on handle {:?}",
            u8::from(self.code),
            self.code,
            self.handle
        )
    }
}

/// Which operations a client may perform on an attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttributeAccessPermissions {
    Readable,
    Writeable,
    ReadableAndWriteable,
    /// Neither readable nor writeable. The value can only reach the client through notifications.
    Inaccessible,
}

impl AttributeAccessPermissions {
    pub fn is_readable(&self) -> bool {
        match self {
            AttributeAccessPermissions::Readable
            | AttributeAccessPermissions::ReadableAndWriteable => true,
            AttributeAccessPermissions::Writeable | AttributeAccessPermissions::Inaccessible => {
                false
            }
        }
    }

    pub fn is_writeable(&self) -> bool {
        match self {
            AttributeAccessPermissions::Writeable
            | AttributeAccessPermissions::ReadableAndWriteable => true,
            AttributeAccessPermissions::Readable | AttributeAccessPermissions::Inaccessible => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_values() {
        assert_eq!(u8::from(ErrorCode::InvalidOffset), 0x07);
        assert_eq!(u8::from(ErrorCode::InvalidAttributeValueLength), 0x0D);
        assert_eq!(u8::from(ErrorCode::ValueNotAllowed), 0x13);
        assert_eq!(ErrorCode::from(0x80), ErrorCode::Unknown(0x80));
    }

    #[test]
    fn permissions() {
        assert!(AttributeAccessPermissions::ReadableAndWriteable.is_readable());
        assert!(AttributeAccessPermissions::ReadableAndWriteable.is_writeable());
        assert!(!AttributeAccessPermissions::Readable.is_writeable());
        assert!(!AttributeAccessPermissions::Inaccessible.is_readable());
        assert!(!AttributeAccessPermissions::Inaccessible.is_writeable());
    }
}
