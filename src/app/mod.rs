//! Application module

pub mod cli;
pub mod driver;
pub mod error;
pub mod startup;
