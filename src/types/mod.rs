pub mod constants;
pub mod error;
pub mod message;

pub use constants::*;
pub use error::{RelayError, Result};
pub use message::RelayMessage;
