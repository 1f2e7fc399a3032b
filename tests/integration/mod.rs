//! Integration tests against a mock HTTP server and a mocked service

pub mod valuation_client;
pub mod workbench_wiring;
