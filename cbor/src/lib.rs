#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod decode;
pub mod encode;
pub mod io;
pub mod validate;

mod header;

pub use header::MajorType;



#[cfg(test)]
mod validate_tests;
