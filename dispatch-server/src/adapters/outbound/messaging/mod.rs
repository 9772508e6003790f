pub mod event_broadcaster;
pub mod event_queue;

pub use event_broadcaster::{
    BroadcastReport, EventBroadcaster, ObserverConnection, RegistrationError,
};
pub use event_queue::EventQueue;
