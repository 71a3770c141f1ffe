//! Core library for tempo: configuration, the embedded city database, city
//! search, and world-clock row assembly.

pub mod cities;
pub mod config;
pub mod search;
pub mod worldclock;
