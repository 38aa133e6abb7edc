//! Core business logic, independent of the HTTP layer.
//!
//! The order workflow is split into [`order`] (validate and price),
//! [`writer`] (atomic commit) and [`recorder`] (diagnostics), tied together by
//! [`submission::submit_order`].

pub mod catalog;
pub mod legacy_import;
pub mod maintenance;
pub mod order;
pub mod pricing;
pub mod recorder;
pub mod submission;
pub mod transaction;
pub mod writer;
