//! End-to-end tests across site families and the transport envelope.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

mod message_flow;
mod site_families;
