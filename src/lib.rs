//! Copy prebuilt patch files into an ExoPlayer demo project checkout.

pub mod commands;
pub mod patch;
pub mod utils;
