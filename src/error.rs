use core::fmt;

/// Errors returned by the encoding helpers and the service registry.
///
/// Errors that are reported back to a peer are ATT errors instead, see [`AttError`].
///
/// [`AttError`]: att/struct.AttError.html
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A value had the wrong length for the field it was supposed to fill.
    InvalidLength,

    /// Invalid value supplied for field.
    ///
    /// The registry also returns this when a handler binding does not match the characteristic's
    /// properties, when an id is registered twice, or when the handle space runs out.
    InvalidValue,

    /// Unexpectedly reached the end of a buffer while reading or writing data.
    ///
    /// Also returned when more characteristics are registered than the registry can hold.
    Eof,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidLength => "invalid length",
            Error::InvalidValue => "invalid value for field",
            Error::Eof => "end of buffer",
        })
    }
}
