use std::time::Duration;

use gridtext::{paginate, LayoutError, Page, PageLimits};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color pushed to the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Presentation preferences for one render job.
///
/// Defaults suit the 64×64 matrix profile: incremental line pushes, a
/// two-second page dwell, white text on a black background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Push the surface after every drawn line instead of once per page.
    pub slow_load: bool,
    /// Dwell time after each page before the final push.
    pub page_pause: Duration,
    /// Foreground text color.
    pub text_color: Rgb,
    /// Page background color.
    pub background: Rgb,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            slow_load: true,
            page_pause: Duration::from_secs(2),
            text_color: Rgb::WHITE,
            background: Rgb::BLACK,
        }
    }
}

impl RenderOptions {
    /// Set incremental vs batch pushing.
    pub fn with_slow_load(mut self, slow_load: bool) -> Self {
        self.slow_load = slow_load;
        self
    }

    /// Set the per-page dwell time.
    pub fn with_page_pause(mut self, page_pause: Duration) -> Self {
        self.page_pause = page_pause;
        self
    }

    /// Set the foreground text color.
    pub fn with_text_color(mut self, text_color: Rgb) -> Self {
        self.text_color = text_color;
        self
    }

    /// Set the page background color.
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }
}

/// A fully laid-out page sequence plus its presentation preferences.
///
/// Jobs are built per incoming sentence and discarded once the scheduler
/// has driven them to completion.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    /// Pages in presentation order.
    pub pages: Vec<Page>,
    /// Preferences the pages are presented with.
    pub options: RenderOptions,
}

impl RenderJob {
    /// Wrap an existing page sequence.
    pub fn new(pages: Vec<Page>, options: RenderOptions) -> Self {
        Self { pages, options }
    }

    /// Lay out `sentence` under `limits` and wrap the result.
    pub fn from_sentence(
        sentence: &str,
        limits: &PageLimits,
        options: RenderOptions,
    ) -> Result<Self, LayoutError> {
        Ok(Self::new(paginate(sentence, limits)?, options))
    }

    /// Number of pages in this job.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
