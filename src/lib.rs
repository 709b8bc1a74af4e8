//! homehosts - switch hosts file entries depending on the current Wi-Fi network.

pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod platform;
pub mod region;
pub mod store;
pub mod watch;
