//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: shared test utilities
//! - `precedence`: layer precedence tests
//! - `field_resolution`: issue target, API base, and credential resolution

mod helpers;
