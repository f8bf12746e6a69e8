//! Salary Normalization Engine
//!
//! This crate turns an employment history (dated periods with a monthly salary
//! in some currency) into month-by-month salary tables expressed in chosen
//! reporting currencies, optionally adjusted for purchasing power so that
//! salaries from different years can be compared.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
