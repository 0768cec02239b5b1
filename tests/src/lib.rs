//! # Property Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs       # End-to-end command sequences
//! │   ├── properties.rs  # Conservation / solvency over random sequences
//! │   └── runtime.rs     # Invocations through the runtime shell
//! └── benches/           # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pty-tests
//! cargo test -p pty-tests integration::properties::
//! cargo bench -p pty-tests
//! ```

pub mod integration;
