//! Public transit departure board.
//!
//! Resolves a stop by name against the Västtrafik API, fetches its next
//! departures and normalizes them into display-ready records, using the
//! real-time estimate when one exists.

pub mod cache;
pub mod config;
pub mod departures;
pub mod domain;
pub mod pipeline;
pub mod stops;
pub mod vasttrafik;
pub mod web;
