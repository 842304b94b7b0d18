//! Incremental, resumable classification of CBOR items.
//!
//! [`Reader`] pulls bytes from a [`Source`] that may deliver data in
//! arbitrary fragments. Each call to [`Reader::try_next`] either finishes
//! classifying one item, or returns `Ok(None)` when the source cannot
//! currently supply the bytes the item still needs. The decode state is kept
//! in the reader across calls, so the caller simply polls again once more
//! bytes have arrived; nothing is consumed twice and no progress is lost.

use crate::header::{self, MajorType};
use crate::io::Source;
use thiserror::Error;

/// Structural faults in an encoded item, surfaced as normal return values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("reserved additional-info value {0}")]
    ReservedAdditionalInfo(u8),

    #[error("{0:?} has no indefinite-length form")]
    NotIndefinite(MajorType),

    #[error("simple value {0} must use the immediate encoding")]
    BadSimpleValue(u8),
}

/// Classification of one completed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    UnsignedInt,
    NegativeInt,
    Bytes,
    Text,
    Array,
    Map,
    Tag,
    Boolean,
    Null,
    Undefined,
    SimpleValue,
    /// Half or single precision.
    Float,
    Double,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    AdditionalInfo,
    WaitAvailable,
    ReadValue,
    DetermineType,
}

/// A resumable item classifier over a byte source.
pub struct Reader<S: Source> {
    source: S,
    phase: Phase,
    major: u8,
    info: u8,
    value: u64,
    need: usize,
    error: Option<SyntaxError>,
}

impl<S: Source> Reader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: Phase::Start,
            major: 0,
            info: 0,
            value: 0,
            need: 0,
            error: None,
        }
    }

    /// Classifies the next item from the source.
    ///
    /// Returns `Ok(Some(_))` once an item's header is fully decoded, with
    /// the header fields readable through the accessors. `Ok(None)` means
    /// the source has no bytes at an item boundary, or too few bytes
    /// mid-item: poll again once more data has arrived. `Err` reports a
    /// structural fault; faults detected in the initial byte are reported
    /// again on every retry, since the item can never complete.
    pub fn try_next(&mut self) -> Result<Option<DataType>, SyntaxError> {
        if self.phase == Phase::Start {
            let initial = self.source.read();
            self.value = 0;
            self.error = None;
            let Some(initial) = initial else {
                self.major = 0;
                self.info = 0;
                self.need = 0;
                return Ok(None);
            };
            (self.major, self.info) = header::split(initial);
            self.phase = Phase::AdditionalInfo;
        }

        if self.phase == Phase::AdditionalInfo {
            match header::extension_len(self.info) {
                // The phase is deliberately left where it is on these two
                // faults, so a retry reproduces the same error instead of
                // misreading the bytes that follow.
                None => return self.fail(SyntaxError::ReservedAdditionalInfo(self.info)),
                Some(0) if self.info == header::INDEFINITE => match self.major {
                    header::UNSIGNED_INT | header::NEGATIVE_INT | header::TAG => {
                        return self.fail(SyntaxError::NotIndefinite(MajorType::from_wire(
                            self.major,
                        )));
                    }
                    _ => self.phase = Phase::ReadValue,
                },
                Some(0) => self.phase = Phase::ReadValue,
                Some(need) => {
                    self.need = need;
                    self.phase = Phase::WaitAvailable;
                }
            }
        }

        if self.phase == Phase::WaitAvailable {
            // The sole suspension point: nothing is consumed until the
            // whole extension is deliverable in one go.
            if self.source.available() < self.need {
                return Ok(None);
            }
            self.phase = Phase::ReadValue;
        }

        if self.phase == Phase::ReadValue {
            self.value = match self.info {
                24..=27 => {
                    let mut value = 0;
                    for _ in 0..self.need {
                        // available() has already vouched for these bytes
                        value = (value << 8) | u64::from(self.source.read().unwrap_or(0));
                    }
                    value
                }
                header::INDEFINITE => 0,
                info => u64::from(info),
            };
            self.phase = Phase::DetermineType;
        }

        // The next call starts a fresh item.
        self.phase = Phase::Start;
        match self.major {
            header::UNSIGNED_INT => Ok(Some(DataType::UnsignedInt)),
            header::NEGATIVE_INT => Ok(Some(DataType::NegativeInt)),
            header::BYTES => Ok(Some(DataType::Bytes)),
            header::TEXT => Ok(Some(DataType::Text)),
            header::ARRAY => Ok(Some(DataType::Array)),
            header::MAP => Ok(Some(DataType::Map)),
            header::TAG => Ok(Some(DataType::Tag)),
            _ => match self.info {
                20 | 21 => {
                    self.value = 0;
                    Ok(Some(DataType::Boolean))
                }
                22 => {
                    self.value = 0;
                    Ok(Some(DataType::Null))
                }
                23 => {
                    self.value = 0;
                    Ok(Some(DataType::Undefined))
                }
                24 => {
                    if self.value < 32 {
                        self.fail(SyntaxError::BadSimpleValue(self.value as u8))
                    } else {
                        Ok(Some(DataType::SimpleValue))
                    }
                }
                25 | 26 => Ok(Some(DataType::Float)),
                27 => Ok(Some(DataType::Double)),
                header::INDEFINITE => {
                    self.value = 0;
                    Ok(Some(DataType::Break))
                }
                // 28-30 were rejected during AdditionalInfo
                _ => Ok(Some(DataType::SimpleValue)),
            },
        }
    }

    fn fail(&mut self, error: SyntaxError) -> Result<Option<DataType>, SyntaxError> {
        self.error = Some(error);
        Err(error)
    }

    /// The last structural fault reported by [`try_next`].
    pub fn syntax_error(&self) -> Option<SyntaxError> {
        self.error
    }

    /// Major type of the current item header.
    pub fn major_type(&self) -> MajorType {
        MajorType::from_wire(self.major)
    }

    /// The raw 64-bit extended value, whatever its meaning.
    pub fn raw_value(&self) -> u64 {
        self.value
    }

    /// Magnitude of an unsigned-integer item, 0 for anything else.
    pub fn unsigned_int(&self) -> u64 {
        if self.major == header::UNSIGNED_INT {
            self.value
        } else {
            0
        }
    }

    /// Value of a negative-integer item (`-1 - n`), 0 for anything else.
    pub fn int(&self) -> i64 {
        if self.major == header::NEGATIVE_INT {
            -1 - (self.value as i64)
        } else {
            0
        }
    }

    /// True only for the `true` simple value.
    pub fn boolean(&self) -> bool {
        self.major == header::SIMPLE_FLOAT && self.info == 21
    }

    /// The simple-value code, 0 for non-simple items.
    pub fn simple_value(&self) -> u8 {
        if self.major == header::SIMPLE_FLOAT {
            self.value as u8
        } else {
            0
        }
    }

    /// The tag number, 0 for non-tag items.
    pub fn tag(&self) -> u64 {
        if self.major == header::TAG {
            self.value
        } else {
            0
        }
    }

    /// Declared length of a string or container item.
    pub fn length(&self) -> u64 {
        self.value
    }

    /// True for a byte/text string, array or map without an upfront size.
    pub fn is_indefinite(&self) -> bool {
        matches!(
            self.major,
            header::BYTES | header::TEXT | header::ARRAY | header::MAP
        ) && self.info == header::INDEFINITE
    }

    /// The current float item narrowed to single precision.
    pub fn float(&self) -> f32 {
        self.double() as f32
    }

    /// The current float item widened to double precision.
    ///
    /// Half and single precision are reconstructed bit-for-bit from the
    /// big-endian extended value, so NaN payloads, signed zeros, infinities
    /// and subnormals all survive exactly. Returns 0.0 for non-float items.
    pub fn double(&self) -> f64 {
        if self.major != header::SIMPLE_FLOAT {
            return 0.0;
        }
        match self.info {
            25 => half::f16::from_bits(self.value as u16).into(),
            26 => f64::from(f32::from_bits(self.value as u32)),
            27 => f64::from_bits(self.value),
            _ => 0.0,
        }
    }

    /// Reads string payload bytes, passing straight through to the source.
    ///
    /// After a definite-length `Bytes`/`Text` classification the caller
    /// should request exactly [`length`](Self::length) bytes; for the
    /// indefinite form, iterate chunk sub-items until [`DataType::Break`].
    pub fn read_payload(&mut self, buffer: &mut [u8]) -> usize {
        self.source.read_bulk(buffer)
    }

    /// The underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
