//! Core business logic for Hireboard.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `credit` - Credit-lot ledger and FIFO deduction planning
//! - `job` - Job lifecycle state machine (AdminJob/OfflineJob wrappers)
//! - `catalog` - Posting-cost catalog and effective-price selection

pub mod catalog;
pub mod credit;
pub mod job;
