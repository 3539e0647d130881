pub mod conflict;
pub mod entry;

pub use conflict::*;
pub use entry::*;
