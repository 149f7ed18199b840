//! Unit tests for the issue client module.
