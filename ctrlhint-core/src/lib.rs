
pub mod chord;
pub mod config;
pub mod errors;
pub mod hook;
pub mod ipc;
pub mod key;
pub mod present;
pub mod sink;
pub mod tracker;
pub mod worker;

/// The directory name for xdg
pub const CTRLHINT_DIR_NAME: &str = "ctrlhint";
