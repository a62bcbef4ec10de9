pub mod config;
pub mod error;
pub mod fitting;
pub mod leads;
pub mod telemetry;
