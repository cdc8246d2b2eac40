//! BLE UUIDs (16 or 128 bits).
//!
//! Attributes defined by the Bluetooth SIG use 16-bit aliases. A 16-bit alias `0xABCD` stands
//! for the full UUID `0000ABCD-0000-1000-8000-00805F9B34FB`, which is the *Bluetooth Base UUID*
//! with the alias placed in bytes 2 and 3.
//!
//! Vendor services such as the LED Button Service use full 128-bit UUIDs.

use crate::{bytes::*, Error};
use core::fmt;

const BASE_UUID: u128 = 0x00000000_0000_1000_8000_00805F9B34FB;

/// The LED Button Service.
pub const LBS_SERVICE: Uuid128 = Uuid128::from_u128(0x00001523_1212_efde_1523_785feabcd123);

/// The Button characteristic (read).
pub const LBS_BUTTON: Uuid128 = Uuid128::from_u128(0x00001524_1212_efde_1523_785feabcd123);

/// The LED characteristic (write).
pub const LBS_LED: Uuid128 = Uuid128::from_u128(0x00001525_1212_efde_1523_785feabcd123);

/// The Sensor characteristic (notify).
pub const LBS_SENSOR: Uuid128 = Uuid128::from_u128(0x00001526_1212_efde_1523_785feabcd123);

/// A 16-bit UUID alias.
///
/// Can be converted to its 128-bit equivalent via `.into()`.
#[derive(PartialEq, Eq, Copy, Clone)]
pub struct Uuid16(pub u16);

/// A full 128-bit UUID.
#[derive(PartialEq, Eq, Copy, Clone)]
pub struct Uuid128([u8; 16]);

impl Uuid128 {
    /// Creates a 128-bit UUID from 16 raw bytes (encoded in big-endian).
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a 128-bit UUID from its integer form, eg. `0x00001523_1212_efde_1523_785feabcd123`.
    pub const fn from_u128(uuid: u128) -> Self {
        Self(uuid.to_be_bytes())
    }

    /// Returns the UUID's bytes in big-endian order (the order it is written in).
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl From<Uuid16> for Uuid128 {
    fn from(uuid: Uuid16) -> Self {
        Uuid128::from_u128(BASE_UUID | (u128::from(uuid.0) << 96))
    }
}

impl ToBytes for Uuid16 {
    fn to_bytes(&self, writer: &mut ByteWriter<'_>) -> Result<(), Error> {
        writer.write_u16_le(self.0)
    }
}

/// 128-bit UUIDs are transmitted in little-endian byte order.
impl ToBytes for Uuid128 {
    fn to_bytes(&self, writer: &mut ByteWriter<'_>) -> Result<(), Error> {
        let mut le = self.0;
        le.reverse();
        writer.write_slice(&le)
    }
}

impl FromBytes<'_> for Uuid16 {
    fn from_bytes(bytes: &mut ByteReader<'_>) -> Result<Self, Error> {
        Ok(Uuid16(bytes.read_u16_le()?))
    }
}

impl FromBytes<'_> for Uuid128 {
    fn from_bytes(bytes: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut array = bytes.read_array::<16>()?;
        array.reverse();
        Ok(Uuid128(array))
    }
}

impl fmt::Debug for Uuid16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid16({:04x})", self.0)
    }
}

impl fmt::Debug for Uuid128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = u128::from_be_bytes(self.0);
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            raw >> 96,
            (raw >> 80) & 0xffff,
            (raw >> 64) & 0xffff,
            (raw >> 48) & 0xffff,
            raw & 0xffff_ffff_ffff,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_16_to_128() {
        let uuid: Uuid128 = Uuid16(0x2902).into();
        assert_eq!(
            format!("{:?}", uuid),
            "00002902-0000-1000-8000-00805f9b34fb"
        );
    }

    #[test]
    fn lbs_uuids_format() {
        assert_eq!(
            format!("{:?}", LBS_SERVICE),
            "00001523-1212-efde-1523-785feabcd123"
        );
        assert_eq!(
            format!("{:?}", LBS_SENSOR),
            "00001526-1212-efde-1523-785feabcd123"
        );
    }

    #[test]
    fn uuid128_wire_order() {
        let mut buf = [0; 16];
        LBS_LED.to_bytes(&mut ByteWriter::new(&mut buf)).unwrap();
        assert_eq!(buf[0], 0x23);
        assert_eq!(buf[12], 0x25);
        assert_eq!(buf[13], 0x15);
        assert_eq!(buf[15], 0x00);

        let decoded = <Uuid128 as FromBytes<'_>>::from_bytes(&mut ByteReader::new(&buf)).unwrap();
        assert_eq!(decoded, LBS_LED);
    }
}
