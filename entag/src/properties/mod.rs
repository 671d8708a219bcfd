//! Generic audio properties
//!
//! Every format has its own stream header, but they all report the same [`EncodingInfo`].

mod encoding_info;

pub use encoding_info::EncodingInfo;

pub(crate) use encoding_info::clamp_i32;
