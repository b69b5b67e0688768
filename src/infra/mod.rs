//! Wire codecs used on the host link.
pub mod codec;
