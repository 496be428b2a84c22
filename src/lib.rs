#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod cell;
mod clock;
mod common;
mod config;
#[cfg(feature = "std")]
mod logging;
pub mod player;
#[cfg(feature = "std")]
mod player_node;
pub mod protocol;
#[cfg(feature = "std")]
pub mod render;
mod session;
mod ship;
mod status;
#[cfg(feature = "std")]
pub mod transport;
mod view;

pub use board::*;
pub use cell::Cell;
pub use clock::*;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
#[cfg(feature = "std")]
pub use player_node::*;
pub use protocol::Message;
pub use session::*;
pub use ship::*;
pub use status::StatusMessage;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
pub use view::OpponentView;
