//! Core library for Daily Weaver: preference scoring, seeded daily picks, and the journal.

pub mod config;
pub mod error;
pub mod journal;
pub mod preference;
pub mod sampling;
pub mod telemetry;
