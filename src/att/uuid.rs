use crate::{bytes::*, uuid::*, Error};
use core::{cmp::PartialEq, fmt};

/// Attribute type UUID (either a 16 or a 128-bit UUID).
///
/// A 16-bit alias compares equal to its widened 128-bit form.
#[derive(Copy, Clone, Eq)]
pub enum AttUuid {
    Uuid16(Uuid16),
    Uuid128(Uuid128),
}

impl ToBytes for AttUuid {
    fn to_bytes(&self, writer: &mut ByteWriter<'_>) -> Result<(), Error> {
        match self {
            AttUuid::Uuid16(uuid) => uuid.to_bytes(writer),
            AttUuid::Uuid128(uuid) => uuid.to_bytes(writer),
        }
    }
}

impl PartialEq for AttUuid {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttUuid::Uuid16(a), AttUuid::Uuid16(b)) => a == b,
            (AttUuid::Uuid128(a), b) | (b, AttUuid::Uuid128(a)) => *a == Uuid128::from(*b),
        }
    }
}

impl PartialEq<Uuid16> for AttUuid {
    fn eq(&self, other: &Uuid16) -> bool {
        self == &Self::from(*other)
    }
}

impl PartialEq<Uuid128> for AttUuid {
    fn eq(&self, other: &Uuid128) -> bool {
        self == &Self::from(*other)
    }
}

impl From<Uuid16> for AttUuid {
    fn from(uu: Uuid16) -> Self {
        AttUuid::Uuid16(uu)
    }
}

impl From<Uuid128> for AttUuid {
    fn from(uu: Uuid128) -> Self {
        AttUuid::Uuid128(uu)
    }
}

impl From<AttUuid> for Uuid128 {
    fn from(uu: AttUuid) -> Self {
        match uu {
            AttUuid::Uuid16(u) => u.into(),
            AttUuid::Uuid128(u) => u,
        }
    }
}

impl fmt::Debug for AttUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttUuid::Uuid16(u) => u.fmt(f),
            AttUuid::Uuid128(u) => u.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_width_equality() {
        let short = AttUuid::from(Uuid16(0x2800));
        let long = AttUuid::from(Uuid128::from(Uuid16(0x2800)));
        assert_eq!(short, long);
        assert_eq!(long, short);
        assert!(short != AttUuid::from(Uuid16(0x2803)));
        assert!(long != AttUuid::from(LBS_SERVICE));
    }
}
