#![forbid(unsafe_code)]

pub mod cli;
pub mod formats;
pub mod logging;
pub mod planner;
pub mod source;
pub mod store;
pub mod subject;
pub mod sync;
pub mod table;
