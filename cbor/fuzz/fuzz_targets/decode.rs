#![no_main]

use libfuzzer_sys::fuzz_target;
use rill_cbor::decode::{DataType, Reader};
use rill_cbor::io::SliceSource;

fuzz_target!(|data: &[u8]| {
    let mut source = SliceSource::new(data);
    let mut reader = Reader::new(&mut source);
    loop {
        match reader.try_next() {
            Ok(Some(DataType::Bytes | DataType::Text)) if !reader.is_indefinite() => {
                let mut scratch = [0; 256];
                let mut remaining = reader.length();
                while remaining > 0 {
                    let want = remaining.min(scratch.len() as u64) as usize;
                    if reader.read_payload(&mut scratch[..want]) != want {
                        return;
                    }
                    remaining -= want as u64;
                }
            }
            Ok(Some(DataType::Float | DataType::Double)) => {
                let _ = reader.double();
                let _ = reader.float();
            }
            Ok(Some(_)) => {
                let _ = reader.unsigned_int();
                let _ = reader.int();
                let _ = reader.tag();
                let _ = reader.simple_value();
                let _ = reader.boolean();
            }
            Ok(None) => return,
            // Initial-byte faults are sticky, so stop rather than spin
            Err(_) => return,
        }
    }
});
