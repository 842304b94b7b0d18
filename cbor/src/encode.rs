//! CBOR item encoding.
//!
//! [`Writer`] is stateless: one call per item shape, each writing its bytes
//! to the sink immediately. Integer heads always take the shortest form for
//! the width tiers of RFC 8949; float width is whatever the caller picked,
//! emitted bit-for-bit. Container calls write only the head; the caller is
//! responsible for the agreed number of follow-on items, or for closing
//! indefinite items with [`Writer::end_indefinite`].

use crate::header;
use crate::io::Sink;

/// A stateless item encoder over a byte sink.
pub struct Writer<S: Sink> {
    sink: S,
}

impl<S: Sink> Writer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Writes a shortest-form head: the initial byte plus 0/1/2/4/8
    /// extension bytes chosen by magnitude, big-endian.
    fn write_head(&mut self, base: u8, value: u64) {
        if value < 24 {
            self.sink.write(base | value as u8);
        } else if value <= u64::from(u8::MAX) {
            self.sink.write(base | 24);
            self.sink.write(value as u8);
        } else if value <= u64::from(u16::MAX) {
            self.sink.write(base | 25);
            self.sink.write_all(&(value as u16).to_be_bytes());
        } else if value <= u64::from(u32::MAX) {
            self.sink.write(base | 26);
            self.sink.write_all(&(value as u32).to_be_bytes());
        } else {
            self.sink.write(base | 27);
            self.sink.write_all(&value.to_be_bytes());
        }
    }

    pub fn write_unsigned_int(&mut self, value: u64) {
        self.write_head(header::UNSIGNED_INT << 5, value);
    }

    /// Writes a signed integer, negatives as major type 1 with stored
    /// value `-1 - i`.
    pub fn write_int(&mut self, value: i64) {
        // Arithmetic shift smears the sign bit; xor then complements
        // negatives in place of the branching -1 - i
        let sign = (value >> 63) as u64;
        let base = (sign as u8) & (header::NEGATIVE_INT << 5);
        self.write_head(base, sign ^ value as u64);
    }

    pub fn write_boolean(&mut self, value: bool) {
        self.sink
            .write(header::initial(header::SIMPLE_FLOAT, if value { 21 } else { 20 }));
    }

    pub fn write_null(&mut self) {
        self.sink.write(header::initial(header::SIMPLE_FLOAT, 22));
    }

    pub fn write_undefined(&mut self) {
        self.sink.write(header::initial(header::SIMPLE_FLOAT, 23));
    }

    /// Writes a simple value: codes below 24 inline, the rest through the
    /// one-byte extension form.
    pub fn write_simple_value(&mut self, value: u8) {
        if value < 24 {
            self.sink.write(header::initial(header::SIMPLE_FLOAT, value));
        } else {
            self.sink.write(header::initial(header::SIMPLE_FLOAT, 24));
            self.sink.write(value);
        }
    }

    /// Writes a single-precision float, bit pattern preserved exactly.
    pub fn write_float(&mut self, value: f32) {
        self.sink.write(header::initial(header::SIMPLE_FLOAT, 26));
        self.sink.write_all(&value.to_bits().to_be_bytes());
    }

    /// Writes a double-precision float, bit pattern preserved exactly.
    pub fn write_double(&mut self, value: f64) {
        self.sink.write(header::initial(header::SIMPLE_FLOAT, 27));
        self.sink.write_all(&value.to_bits().to_be_bytes());
    }

    /// Writes a tag head; the caller writes the tagged item next.
    pub fn write_tag(&mut self, tag: u64) {
        self.write_head(header::TAG << 5, tag);
    }

    /// Writes a definite byte-string head; follow with exactly `length`
    /// payload bytes via [`write_payload`](Self::write_payload).
    pub fn begin_bytes(&mut self, length: u64) {
        self.write_head(header::BYTES << 5, length);
    }

    /// Writes a definite text-string head; the payload must be UTF-8.
    pub fn begin_text(&mut self, length: u64) {
        self.write_head(header::TEXT << 5, length);
    }

    /// Writes an array head for exactly `length` follow-on items.
    pub fn begin_array(&mut self, length: u64) {
        self.write_head(header::ARRAY << 5, length);
    }

    /// Writes a map head for exactly `length` key/value pairs.
    pub fn begin_map(&mut self, length: u64) {
        self.write_head(header::MAP << 5, length);
    }

    pub fn begin_indefinite_bytes(&mut self) {
        self.sink
            .write(header::initial(header::BYTES, header::INDEFINITE));
    }

    pub fn begin_indefinite_text(&mut self) {
        self.sink
            .write(header::initial(header::TEXT, header::INDEFINITE));
    }

    pub fn begin_indefinite_array(&mut self) {
        self.sink
            .write(header::initial(header::ARRAY, header::INDEFINITE));
    }

    pub fn begin_indefinite_map(&mut self) {
        self.sink
            .write(header::initial(header::MAP, header::INDEFINITE));
    }

    /// Closes any indefinite-length item with the break marker.
    pub fn end_indefinite(&mut self) {
        self.sink.write(header::BREAK);
    }

    /// Raw pass-through for string payload bytes.
    pub fn write_payload(&mut self, data: &[u8]) {
        self.sink.write_all(data);
    }

    /// Writes a whole definite byte string, head and payload.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.begin_bytes(data.len() as u64);
        self.write_payload(data);
    }

    /// Writes a whole definite text string, head and payload.
    pub fn write_text(&mut self, text: &str) {
        self.begin_text(text.len() as u64);
        self.write_payload(text.as_bytes());
    }

    /// The underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
