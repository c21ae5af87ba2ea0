#![allow(dead_code)]

pub use checkrun_test_utils::builders;
pub use checkrun_test_utils::fake_backend;
pub use checkrun_test_utils::http_stub;
pub use checkrun_test_utils::reporter;
pub use checkrun_test_utils::{init_tracing, with_timeout};
