#![no_std]
#![allow(non_camel_case_types, non_snake_case, non_upper_case_globals)]

mod bindings;
pub use bindings::*;

mod error;
pub use error::*;

mod uart;
pub use uart::*;

mod timer;
pub use timer::*;
