//! Child Support Guideline Engine
//!
//! This crate computes child support obligations under a state guideline
//! formula. Worksheet A apportions the combined support need between the
//! parents, Worksheet C supplies a minimum floor for low-income parents, and
//! Worksheet B adjusts each child's obligation for parenting time.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
