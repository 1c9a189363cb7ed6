#![allow(dead_code)]

pub use ratexec_test_utils::builders;
pub use ratexec_test_utils::fake_runner::FakeRunner;
pub use ratexec_test_utils::{init_tracing, run_lines};
