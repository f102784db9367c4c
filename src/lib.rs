//! Work order assignment and workload allocation for jewelry workshops.
//!
//! This crate matches pending work orders to skilled craftspeople under
//! capacity and availability constraints. It supports manual reassignment,
//! absence tracking, and a greedy priority-ordered auto-assign planner.

#![warn(missing_docs)]

pub mod allocation;
pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod workshop;
