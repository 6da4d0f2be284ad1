use core::fmt;

use smallvec::SmallVec;

use crate::metrics::PageLimits;

/// Marker substituted for truncated text and announced on continuation pages.
pub const ELLIPSIS: &str = "...";

/// An indivisible token from the input sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    text: String,
    chars: usize,
}

impl Word {
    /// Wrap a token, caching its character count.
    ///
    /// Counts are Unicode scalar values, matching the fixed-width cell
    /// model of the target surfaces.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self { text, chars }
    }

    /// The continuation marker as a word.
    pub fn marker() -> Self {
        Self::new(ELLIPSIS)
    }

    /// Whether this word is the continuation marker.
    pub fn is_marker(&self) -> bool {
        self.text == ELLIPSIS
    }

    /// Token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character count.
    pub fn chars(&self) -> usize {
        self.chars
    }
}

/// An ordered run of words destined for one text row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    words: SmallVec<[Word; 8]>,
    used: usize,
}

impl Line {
    /// A line holding no words.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Words in placement order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Sum of word character counts on this line.
    pub fn used_chars(&self) -> usize {
        self.used
    }

    /// Whether the line holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The line as displayable text, words joined by a single space.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.used + self.words.len());
        for (index, word) in self.words.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            out.push_str(&word.text);
        }
        out
    }

    fn push(&mut self, word: Word) {
        self.used += word.chars;
        self.words.push(word);
    }

    fn substitute_marker_for_last(&mut self) -> Option<Word> {
        let last = self.words.last_mut()?;
        let replaced = core::mem::replace(last, Word::marker());
        self.used = self.used - replaced.chars + ELLIPSIS.len();
        Some(replaced)
    }
}

/// An ordered run of lines destined for one full-screen draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    lines: Vec<Line>,
}

impl Page {
    /// Lines in placement order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines on this page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    fn substitute_marker_for_last(&mut self) -> Option<Word> {
        self.lines.last_mut()?.substitute_marker_for_last()
    }

    fn has_real_word(&self) -> bool {
        self.lines
            .iter()
            .flat_map(Line::words)
            .any(|word| !word.is_marker())
    }
}

/// Pagination failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// A single word can never pass the strict line-budget check.
    OversizedWord { word: String, budget: usize },
    /// A sealed page retained no real word after marker substitution,
    /// so the continuation scheme cannot advance.
    PageCapacityExhausted {
        lines_per_page: usize,
        chars_per_line: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedWord { word, budget } => write!(
                f,
                "word {:?} does not fit a line budget of {} chars",
                word, budget
            ),
            Self::PageCapacityExhausted {
                lines_per_page,
                chars_per_line,
            } => write!(
                f,
                "page capacity ({} lines x {} chars) cannot advance past continuation markers",
                lines_per_page, chars_per_line
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Split a sentence into display pages.
///
/// Words are whitespace-delimited tokens. Lines are packed greedily under a
/// strict character budget (the reserved character acts as the implicit
/// inter-word space). A page that seals with input remaining has the last
/// word of its last line replaced by [`ELLIPSIS`], and the following page
/// re-announces the marker before repeating the replaced word.
///
/// Pure: identical `(sentence, limits)` inputs produce identical page
/// sequences, and no state is retained between calls.
///
/// Empty or whitespace-only input yields a single page holding one empty
/// line.
pub fn paginate(sentence: &str, limits: &PageLimits) -> Result<Vec<Page>, LayoutError> {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    log::debug!(
        "paginating {} words under {}x{} budget",
        words.len(),
        limits.lines_per_page,
        limits.chars_per_line
    );
    if words.is_empty() {
        let mut page = Page::default();
        page.push_line(Line::empty());
        return Ok(vec![page]);
    }
    Paginator::new(&words, *limits).run()
}

/// Continuation-aware packing steps.
///
/// The index of the word returned to the stream travels explicitly with
/// the step instead of rewinding a shared cursor, keeping the handoff
/// auditable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    PackingLine,
    SealingPage,
    AnnouncingContinuation { resume: usize },
}

struct Paginator<'a> {
    words: &'a [&'a str],
    limits: PageLimits,
    cursor: usize,
    page: Page,
    pages: Vec<Page>,
    step: Step,
}

impl<'a> Paginator<'a> {
    fn new(words: &'a [&'a str], limits: PageLimits) -> Self {
        Self {
            words,
            limits,
            cursor: 0,
            page: Page::default(),
            pages: Vec::new(),
            step: Step::PackingLine,
        }
    }

    fn run(mut self) -> Result<Vec<Page>, LayoutError> {
        loop {
            match self.step {
                Step::PackingLine => {
                    self.pack_line(false)?;
                    self.step = self.after_line();
                }
                Step::AnnouncingContinuation { resume } => {
                    self.cursor = resume;
                    self.pack_line(true)?;
                    self.step = self.after_line();
                }
                Step::SealingPage => {
                    if self.cursor < self.words.len() {
                        // The replaced word reappears after the marker at
                        // the top of the next page.
                        let resume = self.cursor - 1;
                        self.page.substitute_marker_for_last();
                        if !self.page.has_real_word() {
                            return Err(LayoutError::PageCapacityExhausted {
                                lines_per_page: self.limits.lines_per_page,
                                chars_per_line: self.limits.chars_per_line,
                            });
                        }
                        log::debug!("sealed page {} with continuation", self.pages.len());
                        self.flush_page();
                        self.step = Step::AnnouncingContinuation { resume };
                    } else {
                        log::debug!("sealed final page {}", self.pages.len());
                        self.flush_page();
                        return Ok(self.pages);
                    }
                }
            }
        }
    }

    fn after_line(&self) -> Step {
        if self.page.line_count() == self.limits.lines_per_page
            || self.cursor >= self.words.len()
        {
            Step::SealingPage
        } else {
            Step::PackingLine
        }
    }

    /// Pack one line greedily from the cursor.
    ///
    /// The budget check is strictly less-than: the withheld character is the
    /// implicit inter-word space. An announced line is seeded with the
    /// continuation marker before any real word is placed.
    fn pack_line(&mut self, announce: bool) -> Result<(), LayoutError> {
        let mut line = Line::empty();
        let mut remaining = self.limits.chars_per_line;
        if announce {
            let marker = Word::marker();
            remaining = remaining.saturating_sub(marker.chars());
            line.push(marker);
        }

        while self.cursor < self.words.len() {
            let word = self.words[self.cursor];
            let chars = word.chars().count();
            if chars < remaining {
                line.push(Word::new(word));
                remaining -= chars;
                self.cursor += 1;
            } else if line.is_empty() {
                // Deferring to the next line would repeat forever: even a
                // fresh line offers no larger budget.
                return Err(LayoutError::OversizedWord {
                    word: word.to_string(),
                    budget: self.limits.chars_per_line,
                });
            } else {
                break;
            }
        }

        log::trace!("packed line: {:?}", line.text());
        self.page.push_line(line);
        Ok(())
    }

    fn flush_page(&mut self) {
        self.pages.push(core::mem::take(&mut self.page));
    }
}
