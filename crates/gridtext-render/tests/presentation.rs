use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gridtext::{DisplayMetrics, LayoutError};
use gridtext_render::{
    DisplaySurface, Pacer, PageScheduler, PresentError, RenderJob, RenderOptions, Rgb,
};

const PANGRAM: &str = "the quick brown fox jumps over the lazy dog";

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Clear(Rgb),
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Rgb,
    },
    Flush,
    Pause(Duration),
}

type EventLog = Rc<RefCell<Vec<Event>>>;

struct RecordingSurface {
    log: EventLog,
    fail_on_draw: Option<usize>,
    draws: usize,
}

impl DisplaySurface for RecordingSurface {
    type Error = String;

    fn clear(&mut self, color: Rgb) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Clear(color));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) -> Result<(), Self::Error> {
        if self.fail_on_draw == Some(self.draws) {
            return Err("device unreachable".to_string());
        }
        self.draws += 1;
        self.log.borrow_mut().push(Event::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

struct RecordingPacer {
    log: EventLog,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) {
        self.log.borrow_mut().push(Event::Pause(duration));
    }
}

fn harness() -> (EventLog, RecordingSurface, RecordingPacer) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let surface = RecordingSurface {
        log: Rc::clone(&log),
        fail_on_draw: None,
        draws: 0,
    };
    let pacer = RecordingPacer {
        log: Rc::clone(&log),
    };
    (log, surface, pacer)
}

fn scheduler() -> PageScheduler {
    PageScheduler::new(DisplayMetrics::default()).expect("64x64 profile is valid")
}

fn job(sentence: &str, options: RenderOptions) -> RenderJob {
    RenderJob::from_sentence(sentence, &scheduler().limits(), options).expect("layout")
}

fn long_sentence() -> String {
    let mut out = String::new();
    for _ in 0..8 {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str("pack my box with five dozen liquor jugs");
    }
    out
}

#[test]
fn slow_load_pushes_after_every_line() {
    let (log, mut surface, mut pacer) = harness();
    let options = RenderOptions::default().with_page_pause(Duration::from_millis(250));
    scheduler()
        .present(&job(PANGRAM, options), &mut surface, &mut pacer)
        .expect("present");

    let expected = vec![
        Event::Clear(Rgb::BLACK),
        Event::Text {
            text: "the quick brown".to_string(),
            x: 1,
            y: 1,
            color: Rgb::WHITE,
        },
        Event::Flush,
        Event::Text {
            text: "fox jumps over".to_string(),
            x: 1,
            y: 7,
            color: Rgb::WHITE,
        },
        Event::Flush,
        Event::Text {
            text: "the lazy dog".to_string(),
            x: 1,
            y: 13,
            color: Rgb::WHITE,
        },
        Event::Flush,
        Event::Pause(Duration::from_millis(250)),
        Event::Flush,
    ];
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn batch_mode_pushes_once_per_page() {
    let (log, mut surface, mut pacer) = harness();
    let options = RenderOptions::default().with_slow_load(false);
    scheduler()
        .present(&job(PANGRAM, options), &mut surface, &mut pacer)
        .expect("present");

    let flushes = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, Event::Flush))
        .count();
    assert_eq!(flushes, 1, "batch mode pushes exactly once per page");
    assert_eq!(log.borrow().last(), Some(&Event::Flush));
}

#[test]
fn each_page_starts_from_a_cleared_surface() {
    let (log, mut surface, mut pacer) = harness();
    let options = RenderOptions::default().with_slow_load(false);
    let rendered = job(&long_sentence(), options);
    assert!(rendered.page_count() >= 2, "fixture spans pages");
    scheduler()
        .present(&rendered, &mut surface, &mut pacer)
        .expect("present");

    let clears = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, Event::Clear(_)))
        .count();
    assert_eq!(clears, rendered.page_count());
    assert!(matches!(log.borrow()[0], Event::Clear(Rgb::BLACK)));
}

#[test]
fn pause_then_final_push_closes_every_page() {
    let (log, mut surface, mut pacer) = harness();
    let pause = Duration::from_millis(125);
    let options = RenderOptions::default()
        .with_slow_load(false)
        .with_page_pause(pause);
    let rendered = job(&long_sentence(), options);
    scheduler()
        .present(&rendered, &mut surface, &mut pacer)
        .expect("present");

    let events = log.borrow();
    let pauses: Vec<usize> = events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| matches!(event, Event::Pause(d) if *d == pause).then_some(index))
        .collect();
    assert_eq!(pauses.len(), rendered.page_count());
    for index in pauses {
        assert_eq!(
            events.get(index + 1),
            Some(&Event::Flush),
            "the final page push follows the dwell"
        );
    }
}

#[test]
fn lines_are_placed_from_the_margins() {
    let (log, mut surface, mut pacer) = harness();
    let metrics = DisplayMetrics {
        left_margin: 3,
        top_margin: 2,
        ..DisplayMetrics::default()
    };
    let scheduler = PageScheduler::new(metrics).expect("profile");
    let rendered = RenderJob::from_sentence(PANGRAM, &scheduler.limits(), RenderOptions::default())
        .expect("layout");
    scheduler
        .present(&rendered, &mut surface, &mut pacer)
        .expect("present");

    let events = log.borrow();
    let positions: Vec<(i32, i32)> = events
        .iter()
        .filter_map(|event| match event {
            Event::Text { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(positions, vec![(3, 2), (3, 8), (3, 14)]);
}

#[test]
fn configured_text_color_reaches_the_surface() {
    let (log, mut surface, mut pacer) = harness();
    let green = Rgb::new(0, 200, 64);
    let options = RenderOptions::default().with_text_color(green);
    scheduler()
        .present(&job("hi there", options), &mut surface, &mut pacer)
        .expect("present");

    let events = log.borrow();
    assert!(events.iter().any(|event| matches!(
        event,
        Event::Text { text, color, .. } if text == "hi there" && *color == green
    )));
}

#[test]
fn surface_failure_propagates_and_leaves_partial_page() {
    let (log, mut surface, mut pacer) = harness();
    surface.fail_on_draw = Some(1);
    let err = scheduler()
        .present(&job(PANGRAM, RenderOptions::default()), &mut surface, &mut pacer)
        .unwrap_err();
    assert_eq!(err, "device unreachable");

    // No rollback: the first line stays drawn, and the page never reaches
    // its dwell.
    let events = log.borrow();
    assert_eq!(
        events.as_slice(),
        &[
            Event::Clear(Rgb::BLACK),
            Event::Text {
                text: "the quick brown".to_string(),
                x: 1,
                y: 1,
                color: Rgb::WHITE,
            },
            Event::Flush,
        ]
    );
}

#[test]
fn layout_failure_precedes_any_surface_work() {
    let (log, mut surface, mut pacer) = harness();
    let err = scheduler()
        .render_sentence_with_pacer(
            "supercalifragilisticexpialidocious",
            RenderOptions::default(),
            &mut surface,
            &mut pacer,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PresentError::Layout(LayoutError::OversizedWord { .. })
    ));
    assert!(log.borrow().is_empty(), "surface must stay untouched");
}

#[test]
fn empty_sentence_presents_one_blank_page() {
    let (log, mut surface, mut pacer) = harness();
    scheduler()
        .render_sentence_with_pacer(
            "",
            RenderOptions::default().with_slow_load(false),
            &mut surface,
            &mut pacer,
        )
        .expect("present");

    let events = log.borrow();
    assert_eq!(
        events.as_slice(),
        &[
            Event::Clear(Rgb::BLACK),
            Event::Text {
                text: String::new(),
                x: 1,
                y: 1,
                color: Rgb::WHITE,
            },
            Event::Pause(Duration::from_secs(2)),
            Event::Flush,
        ]
    );
}
