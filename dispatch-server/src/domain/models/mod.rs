pub mod coordinate;
pub mod dispatch;
pub mod event;
pub mod launch_site;
pub mod mission;
pub mod region;

// Re-export specific items for easier access
pub use coordinate::*;
pub use dispatch::*;
pub use event::*;
pub use launch_site::*;
pub use mission::*;
pub use region::*;
