//! Mock injection backend for testing.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use mousectl_types::{ButtonState, Displacement, MouseButton, Position};
use tracing::warn;

use crate::error::InputError;
use crate::InjectionBackend;

/// A call that reached the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Move(Displacement),
    MoveTo(Position),
    Button {
        button: MouseButton,
        state: ButtonState,
    },
    Scroll(Displacement),
}

/// Recorded call with the instant it arrived.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub call: MockCall,
    pub at: Instant,
}

/// Shared state for observing what `MockBackend` did.
#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    /// Tracked cursor; `None` in relative mode.
    position: Option<Position>,
    /// Number of `move_relative` calls seen, failed ones included.
    moves: usize,
    fail_on_move: Option<usize>,
    fail_position: bool,
    closed: bool,
}

/// Mock backend for testing.
///
/// In relative mode it behaves like the uinput backend (no position, `move_to`
/// ignored); in absolute mode it tracks a virtual cursor.
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// A relative-only mock.
    pub fn relative() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// An absolute mock with the cursor starting at `start`.
    pub fn absolute(start: Position) -> Self {
        let state = MockState {
            position: Some(start),
            ..MockState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Make the `n`th `move_relative` call (1-based) fail with an emit error.
    #[must_use]
    pub fn fail_on_move(self, n: usize) -> Self {
        self.state.lock().unwrap().fail_on_move = Some(n);
        self
    }

    /// Make every `position` call fail.
    #[must_use]
    pub fn fail_position(self) -> Self {
        self.state.lock().unwrap().fail_position = true;
        self
    }

    /// Get a clonable handle for observing the mock from tests.
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn record(&self, call: MockCall) {
        self.state.lock().unwrap().calls.push(RecordedCall {
            call,
            at: Instant::now(),
        });
    }
}

/// Clonable observer handle for `MockBackend`.
#[derive(Clone)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    /// Snapshot of every recorded call.
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Snapshot of recorded calls without timestamps.
    pub fn calls(&self) -> Vec<MockCall> {
        self.recorded().into_iter().map(|r| r.call).collect()
    }

    /// Relative moves that were emitted successfully, in order.
    pub fn moves(&self) -> Vec<Displacement> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Move(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Number of button transitions matching `button` and `state`.
    pub fn count_button(&self, button: MouseButton, state: ButtonState) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == MockCall::Button { button, state })
            .count()
    }

    /// Whether the backend has been dropped.
    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}

impl InjectionBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn supports_absolute(&self) -> bool {
        self.state.lock().unwrap().position.is_some()
    }

    fn move_relative(&mut self, delta: Displacement) -> Result<(), InputError> {
        {
            let mut state = self.state.lock().unwrap();
            state.moves += 1;
            if state.fail_on_move == Some(state.moves) {
                return Err(InputError::Emit(format!(
                    "injected failure on move {}",
                    state.moves
                )));
            }
            if let Some(pos) = state.position {
                state.position = Some(pos.offset(delta));
            }
        }
        self.record(MockCall::Move(delta));
        Ok(())
    }

    fn move_to(&mut self, target: Position) -> Result<(), InputError> {
        {
            let mut state = self.state.lock().unwrap();
            if state.position.is_none() {
                warn!(x = target.x, y = target.y, "mock backend is relative-only; ignoring move_to");
                return Ok(());
            }
            state.position = Some(target);
        }
        self.record(MockCall::MoveTo(target));
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<(), InputError> {
        self.record(MockCall::Button {
            button,
            state: ButtonState::Pressed,
        });
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<(), InputError> {
        self.record(MockCall::Button {
            button,
            state: ButtonState::Released,
        });
        Ok(())
    }

    fn position(&mut self) -> Result<Option<Position>, InputError> {
        let state = self.state.lock().unwrap();
        if state.fail_position {
            return Err(InputError::Position("injected failure".to_string()));
        }
        Ok(state.position)
    }

    fn scroll(&mut self, delta: Displacement) -> Result<(), InputError> {
        self.record(MockCall::Scroll(delta));
        Ok(())
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.closed = true;
        }
    }
}
