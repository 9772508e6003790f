// Ports: the seams between the dispatch engine and its collaborators.
//
// Admission policies and event publishing are injected as trait objects so
// the planner and the dispatch service never depend on concrete adapters.

pub mod outbound;

pub use outbound::*;
