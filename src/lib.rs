//! Translates HP-15C program listings, as exported by the HP-15C emulator,
//! into HP-42S listings in the `txt2raw` dialect.
//!
//! Steps with no HP-42S equivalent are never dropped: they come out as lines
//! starting with `##` so they can be patched by hand.

pub mod decode;
pub mod dispatch;
pub mod error;
pub mod listing;
pub mod number;
pub mod operand;
pub mod output;
pub mod tables;
pub mod translate;

pub use decode::{Decode, Detect, Encoding};
pub use error::{Error, Result};
pub use output::{Line, Unmapped};
pub use tables::Tables;
pub use translate::{translate, Stats, Translator};
