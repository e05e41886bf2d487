pub mod app;
pub mod core;
pub mod feeder;
pub mod notifications;
