//! Byte source and sink contracts.
//!
//! Sources are non-blocking by construction: `read` reports "nothing
//! available right now" as `None` instead of waiting, and `available` gives
//! a lower bound on the bytes `read` can deliver without stalling. The
//! reader and validator borrow a source for the duration of a call; they
//! never own it.

use alloc::vec::Vec;

/// A non-blocking supplier of bytes.
pub trait Source {
    /// Takes the next byte, or `None` if no byte is immediately available.
    fn read(&mut self) -> Option<u8>;

    /// A lower bound on the bytes `read` can currently deliver.
    fn available(&self) -> usize;

    /// Reads up to `buffer.len()` bytes, returning how many were read.
    fn read_bulk(&mut self, buffer: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buffer.len() {
            match self.read() {
                Some(b) => {
                    buffer[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}

impl<T: Source + ?Sized> Source for &mut T {
    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }

    fn available(&self) -> usize {
        (**self).available()
    }

    fn read_bulk(&mut self, buffer: &mut [u8]) -> usize {
        (**self).read_bulk(buffer)
    }
}

/// A byte destination. Buffering and flushing are the sink's concern.
pub trait Sink {
    fn write(&mut self, byte: u8);

    fn write_all(&mut self, data: &[u8]) {
        for &b in data {
            self.write(b);
        }
    }
}

impl<T: Sink + ?Sized> Sink for &mut T {
    fn write(&mut self, byte: u8) {
        (**self).write(byte)
    }

    fn write_all(&mut self, data: &[u8]) {
        (**self).write_all(data)
    }
}

impl Sink for Vec<u8> {
    fn write(&mut self, byte: u8) {
        self.push(byte)
    }

    fn write_all(&mut self, data: &[u8]) {
        self.extend_from_slice(data)
    }
}

/// A [`Source`] over an in-memory buffer.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Source for SliceSource<'_> {
    fn read(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }

    fn available(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bulk(&mut self, buffer: &mut [u8]) -> usize {
        let n = buffer.len().min(self.available());
        buffer[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }
}
