pub mod config;
pub mod error;
pub mod input;
pub mod limits;
pub mod logging;
pub mod probe;
pub mod report;
pub mod scan;
