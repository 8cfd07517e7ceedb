use mirrorgraph::channel::ViewFrame;
use mirrorgraph::telemetry::{FormatterMode, PlainFormatter, ViewFormatter};

mod common;
use common::*;

fn reconciled_frame() -> ViewFrame {
    let mut session = seeded_session();
    let report = session.apply_snapshot(&triangle_snapshot()).unwrap();
    ViewFrame::capture(session.store(), &report)
}

#[test]
fn a_reconciled_frame_renders_every_entity() {
    let formatter = PlainFormatter::with_mode(FormatterMode::Plain);
    let rendered = formatter.render_frame(&reconciled_frame()).join_lines();

    assert!(rendered.contains("nodes +3/-0"), "got: {rendered}");
    for key in ["1", "2", "3"] {
        assert!(rendered.contains(&format!("node {key}")), "got: {rendered}");
    }
    assert!(rendered.contains("edge 1 -> 2"), "got: {rendered}");
    assert!(rendered.contains("edge 2 -> 3"), "got: {rendered}");
    assert_eq!(rendered.lines().count(), 1 + 3 + 3);
}

#[test]
fn frame_context_carries_the_report_summary() {
    let formatter = PlainFormatter::with_mode(FormatterMode::Plain);
    let frame = reconciled_frame();
    let render = formatter.render_frame(&frame);
    assert_eq!(render.context.as_deref(), Some(frame.report.to_string().as_str()));
}

#[test]
fn forced_color_survives_redirection() {
    // Colored mode must not consult the terminal.
    let formatter = PlainFormatter::with_mode(FormatterMode::Colored);
    let rendered = formatter.render_frame(&reconciled_frame()).join_lines();
    assert!(rendered.contains("\x1b[32m"));
    assert!(rendered.contains("\x1b[0m"));
}
