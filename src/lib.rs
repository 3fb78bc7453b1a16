//! Core library for the roster-recon command line application.
//!
//! The library exposes the reconciliation pipeline that powers the
//! command-line interface as well as the tests. The modules are structured to
//! keep responsibilities narrow and composable: spreadsheet IO adapters live
//! under [`io`], the tabular data representation inside [`model`], the
//! outer-join and flagging logic in [`merge`], and the log sink configuration
//! in [`logging`].

pub mod error;
pub mod io;
pub mod logging;
pub mod merge;
pub mod model;

pub use error::{ReconError, Result};
