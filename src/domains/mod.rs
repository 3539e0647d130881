pub mod dispatch;
pub mod engineer;
pub mod logger;
pub mod schedule;
pub mod work_order;

pub use dispatch::*;
pub use engineer::*;
pub use logger::*;
pub use schedule::*;
pub use work_order::*;
