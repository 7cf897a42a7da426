//! Platform-specific planners.
//!
//! Each planner turns [`Settings`](crate::bundler::Settings) plus subcommand
//! options into a [`Plan`](crate::bundler::Plan). Planners never write to disk
//! or spawn processes, so every one of them can be previewed on any host.

pub mod macos;
pub mod windows;
