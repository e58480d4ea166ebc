// ABOUTME: Library exports for ghpic modules for testing and external use
// ABOUTME: Makes the uploader, proxy, config, and output layers available to integration tests

pub mod cli;
pub mod cli_output;
pub mod config;
pub mod constants;
pub mod output;
pub mod proxy;
pub mod uploader;
