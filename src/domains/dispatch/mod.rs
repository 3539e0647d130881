pub mod board;
pub mod filter;
pub mod ports;
pub mod stats;

pub use board::*;
pub use filter::*;
pub use ports::*;
pub use stats::*;
