use core::fmt;
use std::time::Duration;

use gridtext::{DisplayMetrics, LayoutError, MetricsError, PageLimits};

use crate::render_ir::{RenderJob, RenderOptions, Rgb};

/// The external rendering target the scheduler draws onto.
///
/// Implementations are synchronous: each call returns once the device has
/// acknowledged the operation. The scheduler never retries and never rolls
/// back; when a call fails mid-page, lines already drawn stay on the
/// device and the error surfaces to the caller unchanged.
pub trait DisplaySurface {
    /// Device failure type.
    type Error;

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Rgb) -> Result<(), Self::Error>;

    /// Draw a run of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) -> Result<(), Self::Error>;

    /// Push buffered drawing to the physical output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Real-time pause seam for the page drive loop.
pub trait Pacer {
    /// Block for `duration`.
    fn pause(&mut self, duration: Duration);
}

/// Pacer backed by `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Never-wait pacer for tests and previews.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&mut self, _duration: Duration) {}
}

/// Failure side of the inbound sentence operation.
#[derive(Clone, Debug, PartialEq)]
pub enum PresentError<E> {
    /// The sentence could not be laid out.
    Layout(LayoutError),
    /// The display surface rejected an operation.
    Surface(E),
}

impl<E: fmt::Display> fmt::Display for PresentError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout failed: {}", err),
            Self::Surface(err) => write!(f, "display surface failed: {}", err),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for PresentError<E> {}

impl<E> From<LayoutError> for PresentError<E> {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

/// Drives timed presentation of render jobs onto one display surface.
///
/// The drive loop is synchronous and blocks the caller for the whole
/// presentation (draw time plus every page pause). Nothing here serializes
/// concurrent callers: exactly one drive loop may touch a given surface at
/// a time, and that discipline belongs to the integrating system.
#[derive(Clone, Copy, Debug)]
pub struct PageScheduler {
    metrics: DisplayMetrics,
    limits: PageLimits,
}

impl PageScheduler {
    /// Build a scheduler over a validated display geometry.
    pub fn new(metrics: DisplayMetrics) -> Result<Self, MetricsError> {
        let limits = metrics.limits()?;
        Ok(Self { metrics, limits })
    }

    /// The geometry this scheduler positions text with.
    pub fn metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    /// The capacity limits sentences are laid out under.
    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Present every page of `job` in order.
    ///
    /// Per page: clear, draw each line at
    /// `(left_margin, top_margin + index * line_height)`, push after every
    /// line when `slow_load` is set, then pause and push once more before
    /// moving on.
    pub fn present<S, P>(
        &self,
        job: &RenderJob,
        surface: &mut S,
        pacer: &mut P,
    ) -> Result<(), S::Error>
    where
        S: DisplaySurface,
        P: Pacer,
    {
        let total = job.page_count();
        for (page_index, page) in job.pages.iter().enumerate() {
            log::debug!("presenting page {}/{}", page_index + 1, total);
            surface.clear(job.options.background)?;

            for (line_index, line) in page.lines().iter().enumerate() {
                let x = self.metrics.left_margin;
                let y = self.metrics.top_margin + line_index as i32 * self.metrics.line_height;
                let text = line.text();
                log::trace!("line {} at ({}, {}): {:?}", line_index, x, y, text);
                surface.draw_text(&text, x, y, job.options.text_color)?;
                if job.options.slow_load {
                    surface.flush()?;
                }
            }

            pacer.pause(job.options.page_pause);
            surface.flush()?;
        }
        Ok(())
    }

    /// Lay out `sentence` and present it in one blocking call.
    pub fn render_sentence<S>(
        &self,
        sentence: &str,
        options: RenderOptions,
        surface: &mut S,
    ) -> Result<(), PresentError<S::Error>>
    where
        S: DisplaySurface,
    {
        self.render_sentence_with_pacer(sentence, options, surface, &mut ThreadPacer)
    }

    /// [`render_sentence`](Self::render_sentence) with an explicit pacer.
    pub fn render_sentence_with_pacer<S, P>(
        &self,
        sentence: &str,
        options: RenderOptions,
        surface: &mut S,
        pacer: &mut P,
    ) -> Result<(), PresentError<S::Error>>
    where
        S: DisplaySurface,
        P: Pacer,
    {
        let job = RenderJob::from_sentence(sentence, &self.limits, options)?;
        self.present(&job, surface, pacer)
            .map_err(PresentError::Surface)
    }
}
