use gridtext_embedded_graphics::{MatrixBuffer, MonoSurface};
use gridtext_render::{InstantPacer, PageScheduler, RenderOptions};

fn surface() -> MonoSurface<MatrixBuffer> {
    MonoSurface::new(MatrixBuffer::new(64, 64))
}

#[test]
fn sentence_renders_onto_the_matrix() {
    let mut surface = surface();
    let scheduler = PageScheduler::new(surface.metrics()).expect("profile");
    scheduler
        .render_sentence_with_pacer(
            "hello tiny screen",
            RenderOptions::default(),
            &mut surface,
            &mut InstantPacer,
        )
        .expect("present");

    // "hello tiny" / "screen" is two lines; slow load pushes after each
    // line plus once more after the page dwell.
    assert_eq!(surface.target().push_count(), 3);
    assert!(surface.target().lit_pushed_pixels() > 0);
}

#[test]
fn batch_mode_pushes_a_page_once() {
    let mut surface = surface();
    let scheduler = PageScheduler::new(surface.metrics()).expect("profile");
    scheduler
        .render_sentence_with_pacer(
            "hello tiny screen",
            RenderOptions::default().with_slow_load(false),
            &mut surface,
            &mut InstantPacer,
        )
        .expect("present");

    assert_eq!(surface.target().push_count(), 1);
}

#[test]
fn later_pages_replace_earlier_frames() {
    let mut surface = surface();
    let scheduler = PageScheduler::new(surface.metrics()).expect("profile");
    let sentence = "pack my box with five dozen liquor jugs ".repeat(8);
    scheduler
        .render_sentence_with_pacer(
            sentence.trim(),
            RenderOptions::default().with_slow_load(false),
            &mut surface,
            &mut InstantPacer,
        )
        .expect("present");

    // More than one page was pushed and the matrix ends on the final
    // (shorter) page.
    assert!(surface.target().push_count() >= 2);
    assert!(surface.target().lit_pushed_pixels() > 0);
}
