//! Render job IR and page scheduling for `gridtext`.
//!
//! Consumes the page sequences produced by the layout engine and drives
//! their timed presentation onto a [`DisplaySurface`].

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

mod render_ir;
mod scheduler;

pub use render_ir::{RenderJob, RenderOptions, Rgb};
pub use scheduler::{
    DisplaySurface, InstantPacer, Pacer, PageScheduler, PresentError, ThreadPacer,
};
