//! Windows builds and installers.
//!
//! - `asio` - CMake build against the Steinberg ASIO SDK
//! - `inno` - Inno Setup installer

pub mod asio;
pub mod inno;
