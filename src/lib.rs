//! Core library for the employee-mapper command line application.
//!
//! The library reconciles a daily production CSV export against a persisted
//! employee reference table and renders the result as a spreadsheet report.
//! IO adapters live under [`io`], domain types inside [`model`], the tabular
//! representation shared by readers and writers in [`sheet`], reference table
//! maintenance in [`store`], the join in [`reconcile`], report layout in
//! [`report`], and end-to-end orchestration under [`pipeline`].

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod sheet;
pub mod store;

pub use error::{MapperError, Result};
