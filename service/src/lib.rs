//! Process-level infrastructure shared by the binaries: command line / environment
//! configuration and console logging.

pub mod config;
pub mod logging;
