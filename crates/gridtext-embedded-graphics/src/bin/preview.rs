//! Render a sentence as ASCII page frames on stdout.
//!
//! ```text
//! cargo run --bin preview -- the quick brown fox jumps over the lazy dog
//! ```

use std::process::ExitCode;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use gridtext_embedded_graphics::{MatrixBuffer, MonoSurface};
use gridtext_render::{InstantPacer, PageScheduler, RenderJob, RenderOptions};

fn main() -> ExitCode {
    let sentence = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let mut surface = MonoSurface::new(MatrixBuffer::new(64, 64));
    let scheduler = match PageScheduler::new(surface.metrics()) {
        Ok(scheduler) => scheduler,
        Err(err) => {
            eprintln!("invalid display profile: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let options = RenderOptions::default().with_slow_load(false);
    let job = match RenderJob::from_sentence(&sentence, &scheduler.limits(), options) {
        Ok(job) => job,
        Err(err) => {
            eprintln!("layout failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // One page per present call so each pushed frame can be dumped before
    // the next page replaces it.
    let total = job.page_count();
    for (index, page) in job.pages.iter().enumerate() {
        let single = RenderJob::new(vec![page.clone()], job.options);
        if let Err(err) = scheduler.present(&single, &mut surface, &mut InstantPacer) {
            match err {}
        }
        println!("page {}/{}", index + 1, total);
        print!("{}", ascii_frame(surface.target()));
    }
    ExitCode::SUCCESS
}

fn ascii_frame(buffer: &MatrixBuffer) -> String {
    let size = buffer.size();
    let mut out = String::with_capacity(((size.width + 1) * size.height) as usize);
    for y in 0..size.height {
        for x in 0..size.width {
            let lit = buffer
                .pushed_pixel(x, y)
                .is_some_and(|color| color != Rgb888::BLACK);
            out.push(if lit { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
