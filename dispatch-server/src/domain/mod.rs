pub mod errors;
pub mod geo;
pub mod models;
pub mod services;

pub use errors::DispatchError;
