pub mod codec;
pub mod dispatch;
pub mod message;

pub use codec::CommandError;
pub use dispatch::{Dispatcher, LedSink, NoLed};
pub use message::{Command, LedColor, Opcode, Response, WireRevision};
