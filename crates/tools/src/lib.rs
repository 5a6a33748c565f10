pub mod logging;
pub mod report;
pub mod seed;
