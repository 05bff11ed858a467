//! ossify core library.
//!
//! Evaluates a directory against a convention: a named list of rules, each
//! asserting that a file, directory, or glob pattern must, should, may, or
//! must not exist. Also carries a small open-source license catalog.
//!
//! High-level modules:
//! - `models`: rule vocabulary, rules, conventions, results and licenses.
//! - `check`: the evaluation engine.
//! - `conventions`: built-in conventions, user convention loading and storage.
//! - `licenses`: embedded license catalog and custom license texts.
//! - `config`: settings discovery and persistence.
//! - `output`: human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: crate error type.
pub mod check;
pub mod cli;
pub mod config;
pub mod conventions;
pub mod error;
pub mod licenses;
pub mod models;
pub mod output;
