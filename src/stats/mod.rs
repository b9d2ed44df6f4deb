pub mod client;

pub use client::{Player, SeasonAverage, StatsClient, Team};
