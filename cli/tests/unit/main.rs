//! Unit tests for qd2 CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod property_tests;
mod teardown_service;
