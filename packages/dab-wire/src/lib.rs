//! Wire-level constants and pure codec functions for the scrcpy control
//! protocol: the only place numeric protocol values live.
pub mod codec;
pub mod constants;
pub mod device_message;
pub mod error;

pub use error::CodecError;
