pub mod schedule;
pub mod trip;
pub mod vehicle;
pub mod weekday;

pub use schedule::*;
pub use trip::*;
pub use vehicle::*;
pub use weekday::*;
