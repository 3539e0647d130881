pub mod recommend;
pub mod roster;

pub use recommend::*;
pub use roster::*;
