pub mod cli;
pub mod config;
pub mod errors;
pub mod forecast;
pub mod gcp;
pub mod io;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod storage;
