pub mod config;
pub mod generate;
pub mod next;
pub mod status;
