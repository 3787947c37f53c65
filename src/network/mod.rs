// Network module - TCP server speaking line-delimited JSON

pub mod protocol;
pub mod server;

pub use protocol::{Command, ErrorBody, Reply};
pub use server::{Server, ServerState};
