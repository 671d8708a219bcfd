#![allow(missing_docs)]

mod ape;
mod flac;
mod mpc;
mod mpeg;
mod ogg;
mod util;
