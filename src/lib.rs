//! # SSO Fixtures
//!
//! Generates fake organization trees and user rosters for exercising a
//! single-sign-on integration, and serves them back through a mock
//! identity provider.

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod providers;
pub mod report;
pub mod storage;
pub mod telemetry;
