//! Drag synthesis from relative steps.
//!
//! A drag of `(dx, dy)` is split into `steps` relative moves. Step `i` moves
//! by `floor(total * i / steps) - floor(total * (i - 1) / steps)` on each
//! axis, so the steps always add up to exactly the requested total and the
//! partial sums never stray more than one pixel from the ideal line.

use std::thread;
use std::time::Duration;

use mousectl_input::{InjectionBackend, InputError};
use mousectl_types::{Displacement, MouseButton};
use tracing::{debug, warn};

/// Shortest pause between pressing the button and the first step, so the
/// target registers the press before motion starts.
pub const MIN_DRAG_SETTLE: Duration = Duration::from_millis(100);

/// Pacing for a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOptions {
    /// Number of relative moves; zero is treated as one.
    pub steps: u32,
    /// Total time spent stepping.
    pub duration: Duration,
    /// Pause after the press, never shorter than [`MIN_DRAG_SETTLE`].
    pub settle: Duration,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            steps: 20,
            duration: Duration::from_millis(500),
            settle: MIN_DRAG_SETTLE,
        }
    }
}

impl DragOptions {
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    fn step_pause(&self) -> Duration {
        self.duration / self.steps.max(1)
    }
}

/// Per-step deltas for a drag of `total` split into `steps` moves.
pub fn step_deltas(total: Displacement, steps: u32) -> impl Iterator<Item = Displacement> {
    let steps = i64::from(steps.max(1));
    (1..=steps).map(move |i| {
        Displacement::new(
            axis_step(total.dx, i, steps),
            axis_step(total.dy, i, steps),
        )
    })
}

#[allow(clippy::cast_possible_truncation)]
fn axis_step(total: i32, i: i64, steps: i64) -> i32 {
    let total = i64::from(total);
    let next = (total * i).div_euclid(steps);
    let prev = (total * (i - 1)).div_euclid(steps);
    // |next - prev| <= ceil(|total| / steps), which fits in i32.
    (next - prev) as i32
}

/// Run a left-button drag over `backend`.
///
/// The button is released on every exit path. If a step fails, the release
/// is still attempted and the step error is returned.
pub fn run(
    backend: &mut dyn InjectionBackend,
    total: Displacement,
    options: &DragOptions,
) -> Result<(), InputError> {
    let mut held = HeldButton::press(backend, MouseButton::Left)?;
    thread::sleep(options.settle.max(MIN_DRAG_SETTLE));

    let pause = options.step_pause();
    for delta in step_deltas(total, options.steps) {
        held.backend.move_relative(delta)?;
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }

    debug!(dx = total.dx, dy = total.dy, steps = options.steps, "drag complete");
    held.release()
}

/// A pressed button that is released when dropped.
struct HeldButton<'a> {
    backend: &'a mut dyn InjectionBackend,
    button: MouseButton,
    armed: bool,
}

impl<'a> HeldButton<'a> {
    fn press(backend: &'a mut dyn InjectionBackend, button: MouseButton) -> Result<Self, InputError> {
        backend.press(button)?;
        Ok(Self {
            backend,
            button,
            armed: true,
        })
    }

    fn release(mut self) -> Result<(), InputError> {
        self.armed = false;
        self.backend.release(self.button)
    }
}

impl Drop for HeldButton<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.backend.release(self.button) {
                warn!(button = %self.button, error = %e, "failed to release button after aborted drag");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(deltas: &[Displacement]) -> Displacement {
        deltas.iter().fold(Displacement::default(), |acc, d| {
            Displacement::new(acc.dx + d.dx, acc.dy + d.dy)
        })
    }

    #[test]
    fn steps_sum_to_total() {
        let totals = [
            (0, 0),
            (1, -1),
            (7, -7),
            (100, 100),
            (-333, 17),
            (19, 0),
            (i32::MAX, i32::MIN),
        ];
        for steps in [1, 2, 3, 7, 20, 64] {
            for (dx, dy) in totals {
                let total = Displacement::new(dx, dy);
                let deltas: Vec<_> = step_deltas(total, steps).collect();
                assert_eq!(deltas.len(), steps as usize);
                assert_eq!(sum(&deltas), total, "steps={steps} total={total}");
            }
        }
    }

    #[test]
    fn seven_over_twenty_stays_on_the_line() {
        let total = Displacement::new(7, -7);
        let deltas: Vec<_> = step_deltas(total, 20).collect();
        assert_eq!(deltas.len(), 20);

        let (mut px, mut py) = (0i32, 0i32);
        for (i, d) in deltas.iter().enumerate() {
            assert!((0..=1).contains(&d.dx), "step {i}: {d}");
            assert!((-1..=0).contains(&d.dy), "step {i}: {d}");
            px += d.dx;
            py += d.dy;
            let ideal = 7.0 * (i as f64 + 1.0) / 20.0;
            assert!((f64::from(px) - ideal).abs() <= 1.0);
            assert!((f64::from(py) + ideal).abs() <= 1.0);
        }
        assert_eq!((px, py), (7, -7));
    }

    #[test]
    fn zero_steps_behaves_like_one() {
        let deltas: Vec<_> = step_deltas(Displacement::new(5, -9), 0).collect();
        assert_eq!(deltas, vec![Displacement::new(5, -9)]);
    }

    #[test]
    fn negative_totals_use_floor() {
        // floor(-1 * i / 4) is -1 from the first step on.
        let deltas: Vec<_> = step_deltas(Displacement::new(-1, 0), 4).collect();
        assert_eq!(deltas[0], Displacement::new(-1, 0));
        assert!(deltas[1..].iter().all(|d| d.is_zero()));
    }

    #[test]
    fn step_pause_divides_duration() {
        let options = DragOptions::default()
            .with_duration(Duration::from_secs(1))
            .with_steps(20);
        assert_eq!(options.step_pause(), Duration::from_millis(50));
        assert_eq!(
            DragOptions::default().with_steps(0).step_pause(),
            Duration::from_millis(500)
        );
    }
}
