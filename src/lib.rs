//! Key usage reporter - service account key audit for Google Cloud
//!
//! Walks every project under an organization or folder, asks the Policy
//! Analyzer when each service account key last authenticated, and writes the
//! result as a CSV report.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, console output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Project walker, key usage collector and the scan pipeline
//! - `gcp`: Google Cloud API traits, wire types, errors and HTTP client
//! - `model`: Domain types shared across layers
//! - `report_writer`: CSV serialization

pub mod cli;
pub mod config;
pub mod core;
pub mod gcp;
pub mod model;
pub mod report_writer;
