#![allow(missing_docs)]

mod conversions;
mod pictures;
