//! Line-oriented interactive command reader.

use std::io::{self, BufRead, Write};

use mousectl_controller::MouseController;
use mousectl_types::MouseButton;
use thiserror::Error;

use crate::demo;

pub const HELP: &str = "\
Commands:
  move DX DY       - Move relative
  abs X Y          - Move to absolute position
  click [button]   - Click (left/right/middle)
  press [button]   - Press and hold a button
  release [button] - Release a held button
  scroll DX DY     - Scroll wheel notches (positive DY scrolls down)
  pos              - Show position
  drag DX DY       - Drag relative
  demo             - Run demo
  info             - Show system info
  help             - Show this list
  quit             - Exit";

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { dx: i32, dy: i32 },
    Abs { x: i32, y: i32 },
    Click(MouseButton),
    Press(MouseButton),
    Release(MouseButton),
    Scroll { dx: i32, dy: i32 },
    Pos,
    Drag { dx: i32, dy: i32 },
    Demo,
    Info,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unknown command: {0} (type `help` for a list)")]
    Unknown(String),
}

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(action) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();
        let action = action.to_ascii_lowercase();

        let command = match action.as_str() {
            "move" => {
                let (dx, dy) = pair(&args, "move DX DY")?;
                Self::Move { dx, dy }
            }
            "abs" => {
                let (x, y) = pair(&args, "abs X Y")?;
                Self::Abs { x, y }
            }
            "scroll" => {
                let (dx, dy) = pair(&args, "scroll DX DY")?;
                Self::Scroll { dx, dy }
            }
            "drag" => {
                let (dx, dy) = pair(&args, "drag DX DY")?;
                Self::Drag { dx, dy }
            }
            "click" => Self::Click(button_arg(&args)),
            "press" => Self::Press(button_arg(&args)),
            "release" => Self::Release(button_arg(&args)),
            "pos" => Self::Pos,
            "demo" => Self::Demo,
            "info" => Self::Info,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(action)),
        };
        Ok(Some(command))
    }
}

fn pair(args: &[&str], usage: &'static str) -> Result<(i32, i32), CommandError> {
    match args {
        [a, b, ..] => Ok((number(a)?, number(b)?)),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn number(word: &str) -> Result<i32, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

fn button_arg(args: &[&str]) -> MouseButton {
    args.first()
        .map_or(MouseButton::Left, |name| MouseButton::from_name(name))
}

/// Read commands from `input` until `quit` or end of input.
///
/// Failed commands are reported on `out` and the session carries on.
pub fn run<R: BufRead, W: Write>(
    controller: &mut MouseController,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\n=== Universal Mouse Control ===")?;
    writeln!(out, "{HELP}\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                writeln!(out, "Error: {e}")?;
                continue;
            }
            Some(Err(e)) => return Err(e),
            None => {
                writeln!(out)?;
                break;
            }
        };
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        if !execute(controller, command, out)? {
            break;
        }
    }
    Ok(())
}

/// Run one command. Returns `false` once the session should end.
fn execute<W: Write>(
    controller: &mut MouseController,
    command: Command,
    out: &mut W,
) -> io::Result<bool> {
    let result = match command {
        Command::Move { dx, dy } => controller
            .move_relative(dx, dy)
            .map(|()| format!("Moved by ({dx}, {dy})")),
        Command::Abs { x, y } => controller.move_to(x, y).map(|()| {
            if controller.supports_absolute() {
                format!("Moved to ({x}, {y})")
            } else {
                format!(
                    "Absolute positioning is not supported by the {} backend",
                    controller.backend_name()
                )
            }
        }),
        Command::Click(button) => controller
            .click(button)
            .map(|()| format!("Clicked {button}")),
        Command::Press(button) => controller
            .press(button)
            .map(|()| format!("Pressed {button}")),
        Command::Release(button) => controller
            .release(button)
            .map(|()| format!("Released {button}")),
        Command::Scroll { dx, dy } => controller
            .scroll(dx, dy)
            .map(|()| format!("Scrolled ({dx}, {dy})")),
        Command::Pos => controller.get_position().map(|pos| match pos {
            Some(pos) => format!("Position: {pos}"),
            None => "Position not available on this backend".to_string(),
        }),
        Command::Drag { dx, dy } => controller
            .drag_default(dx, dy)
            .map(|()| format!("Dragged ({dx}, {dy})")),
        Command::Demo => {
            demo::run(controller, out)?;
            return Ok(true);
        }
        Command::Info => {
            let settings = controller.settings();
            Ok(format!(
                "Display server: {}\nBackend: {}\nClick hold: {} ms\nDrag: {} steps, {} ms settle",
                controller.environment(),
                controller.backend_name(),
                settings.click_hold.as_millis(),
                settings.drag.steps,
                settings.drag.settle.as_millis()
            ))
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => return Ok(false),
    };

    match result {
        Ok(message) => writeln!(out, "{message}")?,
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use mousectl_controller::ControllerSettings;
    use mousectl_input::mock::{MockBackend, MockCall};
    use mousectl_types::{ButtonState, Displacement, EnvironmentKind, Position};

    use super::*;

    #[test]
    fn parses_motion_commands() {
        assert_eq!(
            Command::parse("move 10 -5").unwrap(),
            Some(Command::Move { dx: 10, dy: -5 })
        );
        assert_eq!(
            Command::parse("  ABS 0 1080 ").unwrap(),
            Some(Command::Abs { x: 0, y: 1080 })
        );
        assert_eq!(
            Command::parse("drag -100 100").unwrap(),
            Some(Command::Drag { dx: -100, dy: 100 })
        );
        assert_eq!(
            Command::parse("scroll 0 3").unwrap(),
            Some(Command::Scroll { dx: 0, dy: 3 })
        );
    }

    #[test]
    fn button_defaults_to_left() {
        assert_eq!(
            Command::parse("click").unwrap(),
            Some(Command::Click(MouseButton::Left))
        );
        assert_eq!(
            Command::parse("click right").unwrap(),
            Some(Command::Click(MouseButton::Right))
        );
        assert_eq!(
            Command::parse("press wheel").unwrap(),
            Some(Command::Press(MouseButton::Left))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(
            Command::parse("move 10").unwrap_err(),
            CommandError::Usage("move DX DY")
        );
        assert_eq!(
            Command::parse("abs x 3").unwrap_err(),
            CommandError::InvalidNumber("x".to_string())
        );
        assert_eq!(
            Command::parse("teleport").unwrap_err(),
            CommandError::Unknown("teleport".to_string())
        );
    }

    #[test]
    fn session_survives_errors_and_stops_at_quit() {
        let mock = MockBackend::relative().fail_on_move(1);
        let handle = mock.handle();
        let mut controller = MouseController::with_backend(
            EnvironmentKind::Wayland,
            Box::new(mock),
            ControllerSettings::default(),
        );

        let script = "move 1 1\nmove 2 3\nbogus\n\npos\nabs 5 5\ninfo\nquit\nmove 9 9\n";
        let mut out = Vec::new();
        run(&mut controller, script.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Error: failed to emit event"));
        assert!(out.contains("Moved by (2, 3)"));
        assert!(out.contains("Unknown command: bogus"));
        assert!(out.contains("Position not available on this backend"));
        assert!(out.contains("Absolute positioning is not supported by the mock backend"));
        assert!(out.contains("Display server: wayland"));
        assert_eq!(handle.moves(), vec![Displacement::new(2, 3)]);
    }

    #[test]
    fn invalid_utf8_line_is_reported_and_session_continues() {
        let mock = MockBackend::relative();
        let handle = mock.handle();
        let mut controller = MouseController::with_backend(
            EnvironmentKind::Wayland,
            Box::new(mock),
            ControllerSettings::default(),
        );

        let script: &[u8] = b"move 1 1\n\xff\xfe\nmove 2 2\nquit\n";
        let mut out = Vec::new();
        run(&mut controller, script, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Error: stream did not contain valid UTF-8"));
        assert!(out.contains("Moved by (2, 2)"));
        assert_eq!(
            handle.moves(),
            vec![Displacement::new(1, 1), Displacement::new(2, 2)]
        );
    }

    #[test]
    fn info_reports_effective_settings() {
        let mut controller = MouseController::with_backend(
            EnvironmentKind::X11,
            Box::new(MockBackend::absolute(Position::new(0, 0))),
            ControllerSettings::default(),
        );

        let mut out = Vec::new();
        run(&mut controller, "info\nquit\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Display server: x11"));
        assert!(out.contains("Click hold: 10 ms"));
        assert!(out.contains("Drag: 20 steps, 100 ms settle"));
        assert!(out.ends_with("> "));
    }

    #[test]
    fn absolute_session_reports_position() {
        let mock = MockBackend::absolute(Position::new(10, 20));
        let handle = mock.handle();
        let mut controller = MouseController::with_backend(
            EnvironmentKind::X11,
            Box::new(mock),
            ControllerSettings::default(),
        );

        let mut out = Vec::new();
        run(&mut controller, "abs 300 200\npos\nclick middle\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Moved to (300, 200)"));
        assert!(out.contains("Position: (300, 200)"));
        assert!(out.contains("Clicked middle"));
        assert_eq!(
            handle.calls().last(),
            Some(&MockCall::Button {
                button: MouseButton::Middle,
                state: ButtonState::Released,
            })
        );
    }
}
