pub mod backend;
pub mod cli;
pub mod config;
pub mod present;
pub mod render;
pub mod session;
pub mod util;
pub mod verdict;
