//! Sentence pagination for small fixed-resolution pixel matrices.
//!
//! Converts a whitespace-tokenized sentence into an ordered sequence of
//! pages, each an ordered sequence of lines fitting a display's character
//! grid. Layout is pure; presentation lives in `gridtext-render`.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod layout;
mod metrics;

pub use layout::{paginate, LayoutError, Line, Page, Word, ELLIPSIS};
pub use metrics::{DisplayMetrics, MetricsError, PageLimits};
