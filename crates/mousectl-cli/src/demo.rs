//! Fixed demonstration sequence.

use std::f64::consts::TAU;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use mousectl_controller::{ControllerError, MouseController};
use mousectl_types::{MouseButton, Position};

const SQUARE_SIDE: i32 = 200;
const CIRCLE_RADIUS: f64 = 100.0;
const CIRCLE_POINTS: u32 = 36;

/// Run the demo, reporting progress on `out`.
///
/// A failing step is reported and the demo moves on to the next one.
pub fn run<W: Write>(controller: &mut MouseController, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "STARTING DEMO IN 3 SECONDS")?;
    writeln!(out, "{}", "=".repeat(50))?;
    out.flush()?;
    thread::sleep(Duration::from_secs(3));

    let start = starting_position(controller, out)?;

    writeln!(out, "\n1. Moving in square ({SQUARE_SIDE}px)...")?;
    report(out, square(controller))?;

    writeln!(out, "\n2. Drawing circle...")?;
    report(out, circle(controller))?;
    thread::sleep(Duration::from_millis(500));

    writeln!(out, "\n3. Left click...")?;
    report(out, controller.click(MouseButton::Left))?;
    thread::sleep(Duration::from_millis(500));

    writeln!(out, "\n4. Double click...")?;
    report(out, double_click(controller))?;
    thread::sleep(Duration::from_millis(500));

    writeln!(out, "\n5. Dragging...")?;
    report(out, controller.drag(100, 100, Duration::from_secs(1)))?;
    thread::sleep(Duration::from_millis(500));

    if let Some(pos) = start {
        writeln!(out, "\n6. Returning to start position {pos}...")?;
        report(out, controller.move_to(pos.x, pos.y))?;
    }

    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "DEMO COMPLETE!")?;
    writeln!(out, "{}", "=".repeat(50))
}

/// Read the cursor so the demo can return to it. A failed read is reported
/// and treated like a backend without position support.
fn starting_position<W: Write>(
    controller: &mut MouseController,
    out: &mut W,
) -> io::Result<Option<Position>> {
    match controller.get_position() {
        Ok(Some(pos)) => {
            writeln!(out, "Starting position: {pos}")?;
            Ok(Some(pos))
        }
        Ok(None) => Ok(None),
        Err(e) => {
            report(out, Err(e))?;
            Ok(None)
        }
    }
}

fn report<W: Write>(out: &mut W, result: Result<(), ControllerError>) -> io::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) => writeln!(out, "   failed: {e}"),
    }
}

fn square(controller: &mut MouseController) -> Result<(), ControllerError> {
    let side = SQUARE_SIDE;
    for (dx, dy) in [(side, 0), (0, side), (-side, 0), (0, -side)] {
        controller.move_relative(dx, dy)?;
        thread::sleep(Duration::from_millis(500));
    }
    Ok(())
}

/// Trace a circle as chord deltas between consecutive points.
fn circle(controller: &mut MouseController) -> Result<(), ControllerError> {
    for (dx, dy) in circle_deltas(CIRCLE_RADIUS, CIRCLE_POINTS) {
        controller.move_relative_precise(dx, dy)?;
        thread::sleep(Duration::from_millis(50));
    }
    Ok(())
}

fn circle_deltas(radius: f64, points: u32) -> impl Iterator<Item = (f64, f64)> {
    let angle = move |i: u32| f64::from(i) / f64::from(points) * TAU;
    (1..=points).map(move |i| {
        let (a, b) = (angle(i), angle(i - 1));
        (radius * (a.cos() - b.cos()), radius * (a.sin() - b.sin()))
    })
}

fn double_click(controller: &mut MouseController) -> Result<(), ControllerError> {
    controller.click(MouseButton::Left)?;
    thread::sleep(Duration::from_millis(100));
    controller.click(MouseButton::Left)
}

#[cfg(test)]
mod tests {
    use mousectl_controller::ControllerSettings;
    use mousectl_input::mock::MockBackend;
    use mousectl_types::EnvironmentKind;

    use super::*;

    fn controller_with(mock: MockBackend) -> MouseController {
        MouseController::with_backend(
            EnvironmentKind::X11,
            Box::new(mock),
            ControllerSettings::default(),
        )
    }

    #[test]
    fn failed_position_read_is_reported() {
        let mock = MockBackend::absolute(Position::new(1, 2)).fail_position();
        let mut controller = controller_with(mock);
        let mut out = Vec::new();
        let start = starting_position(&mut controller, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(start, None);
        assert!(out.contains("failed: failed to read cursor position: injected failure"));
    }

    #[test]
    fn starting_position_is_printed_when_available() {
        let mut controller = controller_with(MockBackend::absolute(Position::new(1, 2)));
        let mut out = Vec::new();
        let start = starting_position(&mut controller, &mut out).unwrap();

        assert_eq!(start, Some(Position::new(1, 2)));
        assert_eq!(String::from_utf8(out).unwrap(), "Starting position: (1, 2)\n");

        let mut controller = controller_with(MockBackend::relative());
        let mut out = Vec::new();
        assert_eq!(starting_position(&mut controller, &mut out).unwrap(), None);
        assert!(out.is_empty());
    }

    #[test]
    fn circle_closes() {
        let (sx, sy) = circle_deltas(CIRCLE_RADIUS, CIRCLE_POINTS)
            .fold((0.0, 0.0), |(x, y), (dx, dy)| (x + dx, y + dy));
        assert!(sx.abs() < 1e-9);
        assert!(sy.abs() < 1e-9);
        assert_eq!(circle_deltas(CIRCLE_RADIUS, CIRCLE_POINTS).count(), 36);
    }

    #[test]
    fn circle_chords_are_short() {
        // Chord length for 36 points on r=100 is about 17.4 px.
        for (dx, dy) in circle_deltas(CIRCLE_RADIUS, CIRCLE_POINTS) {
            assert!(dx.hypot(dy) < 18.0);
        }
    }
}
