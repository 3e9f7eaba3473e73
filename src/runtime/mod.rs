//! Programs never touch the outside world directly: they return `Cmd`s and
//! reach the host only through named outgoing ports.

mod cmd;
mod error;
mod port;
mod program;
mod worker;

pub use cmd::Cmd;
pub use error::RuntimeError;
pub use port::{OutgoingPort, Subscription, SEND_LINK};
pub use program::{Flags, Program};
pub use worker::{init, Instance};
