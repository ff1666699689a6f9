//! Control surface for an out-of-process front-end

mod protocol;
mod server;

pub use protocol::{Request, Response, ShellStatus};
pub use server::Server;
