pub mod aircraft;
pub mod airport;
pub mod display;
pub mod error;
