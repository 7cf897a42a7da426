//! plugin_bundler - build and package JUCE/CMake audio plugins.
//!
//! Builds the plugin against the ASIO SDK on Windows and generates the macOS
//! and Windows installers. Exit code 0 on success, 1 on any error.

use plugin_bundler::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
