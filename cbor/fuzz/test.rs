#![cfg(test)]

use rill_cbor::decode::Reader;
use rill_cbor::io::SliceSource;
use rill_cbor::validate::validate;
use std::io::Read;

fn replay(buffer: &[u8]) {
    let mut source = SliceSource::new(buffer);
    while let Ok(Some(_)) = validate(&mut source) {}

    let mut source = SliceSource::new(buffer);
    let mut reader = Reader::new(&mut source);
    while let Ok(Some(_)) = reader.try_next() {
        let _ = reader.double();
        let _ = reader.int();
    }
}

#[test]
fn test_all() {
    for target in ["decode", "validate"] {
        let dir = match std::fs::read_dir(format!("./corpus/{target}")) {
            Err(e) => {
                eprintln!(
                    "Failed to open dir: {e}, curr dir: {}",
                    std::env::current_dir().unwrap().to_string_lossy()
                );
                continue;
            }
            Ok(dir) => dir,
        };
        for entry in dir.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Ok(mut file) = std::fs::File::open(&path) {
                let mut buffer = Vec::new();
                if file.read_to_end(&mut buffer).is_ok() {
                    replay(&buffer);
                }
            }
        }
    }
}
