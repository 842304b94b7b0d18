#![no_main]

use libfuzzer_sys::fuzz_target;
use rill_cbor::io::SliceSource;
use rill_cbor::validate::validate;

fuzz_target!(|data: &[u8]| {
    let mut source = SliceSource::new(data);
    while let Ok(Some(_)) = validate(&mut source) {}
});
