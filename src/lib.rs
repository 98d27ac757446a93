//! Payroll engine for Bosnia and Herzegovina.
//!
//! This crate calculates monthly payroll for the three tax jurisdictions of
//! Bosnia and Herzegovina: the Federation (FBIH), Republika Srpska (RS) and
//! Brcko District (BD). Contribution and tax rates are time-versioned rules
//! resolved as of an effective date. The crate also solves net-to-gross and
//! processes whole pay periods for a tenant.
//!
//! All amounts are integers in the smallest currency subunit (fening).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
