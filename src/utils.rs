pub mod config;
pub mod errors;
pub mod sample_utils;
