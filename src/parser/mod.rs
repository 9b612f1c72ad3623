//! Wisp reader
//!
//! Parses the scanner's token stream into `Value` trees by recursive descent.

mod reader;

pub use reader::{read_all, read_str, Reader};
