//! Dataset Dashboard - data core for the pickups and gym exercises pages
//!
//! Loads the page CSVs once per path, derives columns, filters, and reduces them
//! into plain view models for an external renderer.

pub mod config;
pub mod data;
pub mod pages;
pub mod stats;
