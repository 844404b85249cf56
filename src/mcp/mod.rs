/// JSON-RPC service surface
///
/// Transport plumbing only: message framing lives in `protocol`, the stdio
/// loop and tool dispatch in `server`.

pub mod protocol;
pub mod server;

pub use server::McpServer;
