//! Data layer: core types, parsing, statistics and display helpers.
//!
//! Architecture:
//! ```text
//!  .txt / .csv / .log  (any text, one reading per line)
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ tokenizer  │  line → (HH:MM:SS, dB) candidate or skip
//!   └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ analyzer   │  candidates → Series + StatsBundle
//!   └───────────┘
//!        │                         file name
//!        ▼                             │
//!   ┌───────────┐               ┌───────────┐
//!   │ downsample │  chart points │ filename   │ → FileMetadata
//!   └───────────┘               └───────────┘
//! ```
//!
//! `loader` ties the pipeline to the filesystem and handles export.

pub mod analyzer;
pub mod downsample;
pub mod filename;
pub mod loader;
pub mod model;
pub mod tokenizer;
