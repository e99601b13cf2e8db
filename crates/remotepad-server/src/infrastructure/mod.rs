//! Infrastructure layer: sockets, per-connection sessions, and the server
//! facade.

pub mod acceptance_manager;
pub mod acceptor;
pub mod server;
pub mod stream_reader;
pub mod tcp_session;
pub mod udp_session;

pub use acceptance_manager::AcceptanceManager;
pub use acceptor::ConnectionAcceptor;
pub use server::{RelayServer, ServerError};
pub use stream_reader::StreamReader;
pub use tcp_session::{ClientSession, SessionHandle};
pub use udp_session::DatagramSession;
