//! Recursive well-formedness checking.
//!
//! The validator walks one encoded item, and everything it contains,
//! without building a tree. Unlike the incremental [`Reader`], it has no
//! suspension point: the source is assumed to already hold every byte the
//! item needs, and any short read is reported as [`Malformed`].
//!
//! [`Reader`]: crate::decode::Reader

use crate::header::{self, MajorType};
use crate::io::Source;
use thiserror::Error;

/// Nesting depth allowed by [`validate`] before giving up.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// The single non-diagnostic failure outcome: the item is not safe to
/// parse further.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("malformed CBOR item")]
pub struct Malformed;

/// Outcome of checking one sub-item. `Break` is only ever produced where a
/// break marker is permitted; it never escapes to the public surface.
enum Checked {
    Type(u8),
    Break,
}

/// Validates the next item from `source` with the default depth limit.
///
/// Returns `Ok(Some(_))` with the outer item's major type on success, and
/// `Ok(None)` when the source is empty at an item boundary, which is
/// distinct from a truncated item mid-stream.
pub fn validate<S: Source>(source: &mut S) -> Result<Option<MajorType>, Malformed> {
    validate_with_depth(source, DEFAULT_MAX_DEPTH)
}

/// Validates the next item, refusing nesting deeper than `max_depth`.
pub fn validate_with_depth<S: Source>(
    source: &mut S,
    max_depth: usize,
) -> Result<Option<MajorType>, Malformed> {
    let Some(initial) = source.read() else {
        return Ok(None);
    };
    match check_initial(source, initial, false, max_depth)? {
        Checked::Type(major) => Ok(Some(MajorType::from_wire(major))),
        // breakable was false all the way down
        Checked::Break => Err(Malformed),
    }
}

/// True when the next item on `source` is well-formed.
pub fn is_well_formed<S: Source>(source: &mut S) -> bool {
    matches!(validate(source), Ok(Some(_)))
}

fn check<S: Source>(source: &mut S, breakable: bool, depth: usize) -> Result<Checked, Malformed> {
    let initial = source.read().ok_or(Malformed)?;
    check_initial(source, initial, breakable, depth)
}

fn check_initial<S: Source>(
    source: &mut S,
    initial: u8,
    breakable: bool,
    depth: usize,
) -> Result<Checked, Malformed> {
    let (major, info) = header::split(initial);
    let value = match header::extension_len(info) {
        None => return Err(Malformed),
        Some(0) if info == header::INDEFINITE => {
            return check_indefinite(source, major, breakable, depth);
        }
        Some(0) => u64::from(info),
        Some(len) => {
            let value = read_extension(source, len)?;
            // Simple values below 32 must use the immediate encoding
            if len == 1 && major == header::SIMPLE_FLOAT && value < 32 {
                return Err(Malformed);
            }
            value
        }
    };

    match major {
        header::BYTES | header::TEXT => skip_payload(source, value)?,
        header::ARRAY => check_children(source, value, depth)?,
        header::MAP => {
            let pairs = value.checked_mul(2).ok_or(Malformed)?;
            check_children(source, pairs, depth)?;
        }
        header::TAG => {
            // Exactly one tagged sub-item
            check_children(source, 1, depth)?;
        }
        // Integers and simple/float items were fully consumed by the header
        _ => {}
    }
    Ok(Checked::Type(major))
}

fn check_indefinite<S: Source>(
    source: &mut S,
    major: u8,
    breakable: bool,
    depth: usize,
) -> Result<Checked, Malformed> {
    match major {
        header::BYTES | header::TEXT => {
            let depth = depth.checked_sub(1).ok_or(Malformed)?;
            loop {
                match check(source, true, depth)? {
                    Checked::Break => break,
                    // Byte strings may only chunk into byte strings, text
                    // into text
                    Checked::Type(t) if t != major => return Err(Malformed),
                    Checked::Type(_) => {}
                }
            }
        }
        header::ARRAY => {
            let depth = depth.checked_sub(1).ok_or(Malformed)?;
            loop {
                if let Checked::Break = check(source, true, depth)? {
                    break;
                }
            }
        }
        header::MAP => {
            let depth = depth.checked_sub(1).ok_or(Malformed)?;
            loop {
                if let Checked::Break = check(source, true, depth)? {
                    break;
                }
                check(source, false, depth)?;
            }
        }
        header::SIMPLE_FLOAT => {
            // A bare break marker: only valid where the enclosing
            // indefinite item allows one
            return if breakable {
                Ok(Checked::Break)
            } else {
                Err(Malformed)
            };
        }
        // Integers and tags have no indefinite form
        _ => return Err(Malformed),
    }
    Ok(Checked::Type(major))
}

fn check_children<S: Source>(source: &mut S, count: u64, depth: usize) -> Result<(), Malformed> {
    let depth = depth.checked_sub(1).ok_or(Malformed)?;
    for _ in 0..count {
        check(source, false, depth)?;
    }
    Ok(())
}

fn read_extension<S: Source>(source: &mut S, len: usize) -> Result<u64, Malformed> {
    let mut value = 0;
    for _ in 0..len {
        value = (value << 8) | u64::from(source.read().ok_or(Malformed)?);
    }
    Ok(value)
}

fn skip_payload<S: Source>(source: &mut S, length: u64) -> Result<(), Malformed> {
    // length is attacker-controlled and may exceed the address space, so
    // count down with the wire's 64-bit width
    let mut scratch = [0; 64];
    let mut remaining = length;
    while remaining > 0 {
        let want = remaining.min(scratch.len() as u64) as usize;
        if source.read_bulk(&mut scratch[..want]) != want {
            return Err(Malformed);
        }
        remaining -= want as u64;
    }
    Ok(())
}
