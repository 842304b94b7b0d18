//! Wire-format constants and initial-byte helpers shared by the reader,
//! validator and writer.

// Major types, RFC 8949 §3.1
pub(crate) const UNSIGNED_INT: u8 = 0;
pub(crate) const NEGATIVE_INT: u8 = 1;
pub(crate) const BYTES: u8 = 2;
pub(crate) const TEXT: u8 = 3;
pub(crate) const ARRAY: u8 = 4;
pub(crate) const MAP: u8 = 5;
pub(crate) const TAG: u8 = 6;
pub(crate) const SIMPLE_FLOAT: u8 = 7;

/// Additional-info value marking an indefinite length, or a break marker
/// when combined with major type 7.
pub(crate) const INDEFINITE: u8 = 31;

/// The single byte that terminates any indefinite-length item.
pub(crate) const BREAK: u8 = (SIMPLE_FLOAT << 5) | INDEFINITE;

/// The 3-bit top-level kind of a CBOR item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorType {
    UnsignedInt,
    NegativeInt,
    Bytes,
    Text,
    Array,
    Map,
    Tag,
    SimpleOrFloat,
}

impl MajorType {
    pub(crate) fn from_wire(major: u8) -> Self {
        match major {
            UNSIGNED_INT => Self::UnsignedInt,
            NEGATIVE_INT => Self::NegativeInt,
            BYTES => Self::Bytes,
            TEXT => Self::Text,
            ARRAY => Self::Array,
            MAP => Self::Map,
            TAG => Self::Tag,
            _ => Self::SimpleOrFloat,
        }
    }
}

/// Splits an initial byte into its (major type, additional info) pair.
pub(crate) fn split(initial: u8) -> (u8, u8) {
    (initial >> 5, initial & 0x1F)
}

/// Composes an initial byte from a major type and additional info.
pub(crate) fn initial(major: u8, info: u8) -> u8 {
    (major << 5) | info
}

/// Number of extension bytes implied by an additional-info value, or `None`
/// for the reserved values 28-30. Values below 24 and the indefinite marker
/// carry no extension bytes.
pub(crate) fn extension_len(info: u8) -> Option<usize> {
    match info {
        24 => Some(1),
        25 => Some(2),
        26 => Some(4),
        27 => Some(8),
        28..=30 => None,
        _ => Some(0),
    }
}
