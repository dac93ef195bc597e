use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use autosub::test_utils::TestLogger;
use slog::{Logger, debug};

pub static COMMENT_COUNT: AtomicUsize = AtomicUsize::new(0);

static COMMENT_LOGGER: LazyLock<Logger> = LazyLock::new(TestLogger::stdout);

pub fn comment(comment: String) {
    let old_count = COMMENT_COUNT.fetch_add(1, Ordering::SeqCst);
    debug!(COMMENT_LOGGER, "COMMENT {:02} 💬 {}", old_count + 1, comment);
}

#[macro_export]
macro_rules! comment {
    ( $($comment:tt)* ) => {{
        test_extensions::utilities::comment(format!($($comment)*));
    }};
}
