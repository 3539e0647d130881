pub mod board_service;
pub mod dispatch_service;

pub use board_service::*;
pub use dispatch_service::*;
