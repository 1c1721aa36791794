//! Interpreter for the SVG path mini-language.
//!
//! The `d` attribute is split on whitespace into command letters and
//! `x,y` coordinate tokens. Each command consumes a fixed number of
//! coordinate groups; only the last group moves the current point, so
//! curves and arcs are approximated by their end points.

use crate::error::PathError;
use crate::geometry::Point;

/// Coordinate interpretation of a command letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Uppercase: coordinates are absolute.
    Absolute,
    /// Lowercase: coordinates are relative to the current point.
    Relative,
}

/// A path command, independent of its absolute/relative form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    Horizontal,
    Vertical,
    SmoothQuadratic,
    Quadratic,
    SmoothCubic,
    Cubic,
    Arc,
    ClosePath,
}

impl PathCommand {
    /// Parses a command letter into its command and mode.
    pub fn from_letter(c: char) -> Option<(PathCommand, Mode)> {
        let mode = if c.is_ascii_uppercase() {
            Mode::Absolute
        } else {
            Mode::Relative
        };
        let command = match c.to_ascii_lowercase() {
            'm' => PathCommand::MoveTo,
            'l' => PathCommand::LineTo,
            'h' => PathCommand::Horizontal,
            'v' => PathCommand::Vertical,
            't' => PathCommand::SmoothQuadratic,
            'q' => PathCommand::Quadratic,
            's' => PathCommand::SmoothCubic,
            'c' => PathCommand::Cubic,
            'a' => PathCommand::Arc,
            'z' => PathCommand::ClosePath,
            _ => return None,
        };
        Some((command, mode))
    }

    /// Number of coordinate tokens the command consumes per repetition.
    pub const fn arity(self) -> usize {
        match self {
            PathCommand::MoveTo
            | PathCommand::LineTo
            | PathCommand::Horizontal
            | PathCommand::Vertical
            | PathCommand::SmoothQuadratic => 1,
            PathCommand::Quadratic | PathCommand::SmoothCubic => 2,
            PathCommand::Cubic => 3,
            PathCommand::Arc => 4,
            PathCommand::ClosePath => 0,
        }
    }
}

/// Interpreter state between commands.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    /// Start of the current subpath; close-path returns here.
    start: Point,
    /// Current point.
    current: Point,
}

impl Cursor {
    /// Applies one coordinate group of `command` and returns the new point.
    fn step(&mut self, command: PathCommand, mode: Mode, token: &str) -> Result<Point, PathError> {
        if command == PathCommand::ClosePath {
            return Ok(self.close());
        }
        let origin = match mode {
            Mode::Absolute => Point::ORIGIN,
            Mode::Relative => self.current,
        };
        let next = match command {
            PathCommand::Horizontal => {
                let x = parse_component(token, Component::First)?;
                Point::new(origin.x + x, self.current.y)
            }
            PathCommand::Vertical => {
                let y = parse_component(token, Component::Last)?;
                Point::new(self.current.x, origin.y + y)
            }
            _ => origin + parse_pair(token)?,
        };
        if command == PathCommand::MoveTo {
            self.start = next;
        }
        self.current = next;
        Ok(next)
    }

    fn close(&mut self) -> Point {
        self.current = self.start;
        self.start
    }
}

/// Splits path data into tokens, separating a command letter fused with
/// its first coordinate (`m20,70` becomes `m`, `20,70`).
fn tokenize(d: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for raw in d.split_whitespace() {
        let mut chars = raw.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() && raw.len() > 1 => {
                let (letter, rest) = raw.split_at(c.len_utf8());
                tokens.push(letter);
                tokens.push(rest);
            }
            _ => tokens.push(raw),
        }
    }
    tokens
}

fn is_command(token: &str) -> bool {
    token.len() == 1 && token.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Clone, Copy)]
enum Component {
    First,
    Last,
}

fn parse_number(s: &str, token: &str) -> Result<f64, PathError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| PathError::InvalidCoordinate(token.to_string()))
}

fn parse_component(token: &str, which: Component) -> Result<f64, PathError> {
    let part = match which {
        Component::First => token.split(',').next(),
        Component::Last => token.rsplit(',').next(),
    };
    parse_number(part.unwrap_or(token), token)
}

fn parse_pair(token: &str) -> Result<Point, PathError> {
    let (x, y) = token
        .split_once(',')
        .ok_or_else(|| PathError::InvalidCoordinate(token.to_string()))?;
    Ok(Point::new(parse_number(x, token)?, parse_number(y, token)?))
}

/// Interprets path data into absolute boundary points, without translation.
pub fn parse_path(d: &str) -> Result<Vec<Point>, PathError> {
    let tokens = tokenize(d);
    let mut cursor = Cursor {
        start: Point::ORIGIN,
        current: Point::ORIGIN,
    };
    let mut points = Vec::new();
    let mut active: Option<(char, PathCommand, Mode)> = None;
    // Set when a command letter has not yet consumed any coordinates.
    let mut awaiting_arguments = false;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        if is_command(token) {
            if let Some((letter, command, _)) = active.filter(|_| awaiting_arguments) {
                return Err(PathError::MissingArguments {
                    command: letter,
                    expected: command.arity(),
                    found: 0,
                });
            }
            let letter = token.chars().next().unwrap_or_default();
            let (command, mode) =
                PathCommand::from_letter(letter).ok_or(PathError::UnknownCommand(letter))?;
            i += 1;
            if command == PathCommand::ClosePath {
                points.push(cursor.close());
            }
            active = Some((letter, command, mode));
            awaiting_arguments = command.arity() > 0;
            continue;
        }

        let (letter, command, mode) =
            active.ok_or_else(|| PathError::MissingCommand(token.to_string()))?;
        if command == PathCommand::ClosePath {
            return Err(PathError::ArgumentsAfterClose(letter));
        }

        let arity = command.arity();
        let available = tokens[i..]
            .iter()
            .take(arity)
            .take_while(|t| !is_command(t))
            .count();
        if available < arity {
            return Err(PathError::MissingArguments {
                command: letter,
                expected: arity,
                found: available,
            });
        }

        let last = tokens[i + arity - 1];
        points.push(cursor.step(command, mode, last)?);
        awaiting_arguments = false;
        i += arity;
        // Further pairs after a move are line segments of the same subpath.
        if command == PathCommand::MoveTo {
            let line = match mode {
                Mode::Absolute => 'L',
                Mode::Relative => 'l',
            };
            active = Some((line, PathCommand::LineTo, mode));
        }
    }

    if let Some((letter, command, _)) = active.filter(|_| awaiting_arguments) {
        return Err(PathError::MissingArguments {
            command: letter,
            expected: command.arity(),
            found: 0,
        });
    }

    Ok(points)
}

/// Interprets path data and offsets every point by `offset`.
pub fn interpret_path(d: &str, offset: Point) -> Result<Vec<Point>, PathError> {
    let mut points = parse_path(d)?;
    for p in &mut points {
        *p += offset;
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn closed_square_with_translation() {
        let out = interpret_path("M0,0 L10,0 L10,10 Z", Point::new(5.0, 5.0)).unwrap();
        assert_eq!(out, pts(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 5.0)]));
    }

    #[test]
    fn relative_commands_accumulate() {
        assert_eq!(parse_path("m10,10 l5,0").unwrap(), pts(&[(10.0, 10.0), (15.0, 10.0)]));
    }

    #[test]
    fn absolute_commands_ignore_current_point() {
        assert_eq!(parse_path("M10,10 L5,0").unwrap(), pts(&[(10.0, 10.0), (5.0, 0.0)]));
    }

    #[test]
    fn fused_command_letters_are_split() {
        assert_eq!(
            parse_path("m20,70 l10,0 z").unwrap(),
            pts(&[(20.0, 70.0), (30.0, 70.0), (20.0, 70.0)])
        );
    }

    #[test]
    fn implicit_repetition_of_last_command() {
        assert_eq!(
            parse_path("m0,0 l1,0 0,1 -1,0").unwrap(),
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
        );
    }

    #[test]
    fn pairs_after_move_are_lines_and_close_to_move() {
        assert_eq!(
            parse_path("m 0,0 10,0 0,10 -10,0 z").unwrap(),
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
        );
        assert_eq!(
            parse_path("M 5,5 15,5 15,15 Z").unwrap(),
            pts(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 5.0)])
        );
    }

    #[test]
    fn horizontal_and_vertical_keep_other_axis() {
        assert_eq!(
            parse_path("M2,3 h4 v5 H1 V0").unwrap(),
            pts(&[(2.0, 3.0), (6.0, 3.0), (6.0, 8.0), (1.0, 8.0), (1.0, 0.0)])
        );
    }

    #[test]
    fn curves_keep_only_end_point() {
        let out = parse_path("M0,0 C1,1 2,2 3,0 q5,5 10,0 s1,1 2,2 t4,4 A5,5 0 0,1 50,50").unwrap();
        assert_eq!(
            out,
            pts(&[(0.0, 0.0), (3.0, 0.0), (13.0, 0.0), (15.0, 2.0), (19.0, 6.0), (50.0, 50.0)])
        );
    }

    #[test]
    fn close_returns_to_latest_move() {
        let out = parse_path("M0,0 L1,0 Z M5,5 l1,0 z").unwrap();
        assert_eq!(
            out,
            pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0), (5.0, 5.0), (6.0, 5.0), (5.0, 5.0)])
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(parse_path("M0,0 X1,1"), Err(PathError::UnknownCommand('X')));
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert_eq!(
            parse_path("M0,0 C1,1 2,2"),
            Err(PathError::MissingArguments {
                command: 'C',
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_path("M0,0 C1,1 L2,2 3,3"),
            Err(PathError::MissingArguments {
                command: 'C',
                expected: 3,
                found: 1
            })
        );
        assert_eq!(
            parse_path("M0,0 L Z"),
            Err(PathError::MissingArguments {
                command: 'L',
                expected: 1,
                found: 0
            })
        );
        assert_eq!(
            parse_path("M0,0 L"),
            Err(PathError::MissingArguments {
                command: 'L',
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn coordinates_after_close_are_rejected() {
        assert_eq!(
            parse_path("M0,0 L1,1 Z 4,4"),
            Err(PathError::ArgumentsAfterClose('Z'))
        );
        assert_eq!(
            parse_path("m0,0 l1,1 z4,4"),
            Err(PathError::ArgumentsAfterClose('z'))
        );
    }

    #[test]
    fn leading_coordinates_are_rejected() {
        assert!(matches!(parse_path("1,1 L2,2"), Err(PathError::MissingCommand(_))));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(matches!(parse_path("M1,a"), Err(PathError::InvalidCoordinate(_))));
        assert!(matches!(parse_path("L5"), Err(PathError::InvalidCoordinate(_))));
    }

    #[test]
    fn command_arities() {
        let expected = [
            ('m', 1),
            ('l', 1),
            ('h', 1),
            ('v', 1),
            ('t', 1),
            ('q', 2),
            ('s', 2),
            ('c', 3),
            ('a', 4),
            ('z', 0),
        ];
        for (letter, arity) in expected {
            let (command, mode) = PathCommand::from_letter(letter).unwrap();
            assert_eq!(command.arity(), arity, "arity of {}", letter);
            assert_eq!(mode, Mode::Relative);
            let (upper, mode) = PathCommand::from_letter(letter.to_ascii_uppercase()).unwrap();
            assert_eq!(upper, command);
            assert_eq!(mode, Mode::Absolute);
        }
        assert_eq!(PathCommand::from_letter('x'), None);
    }

    #[test]
    fn empty_path_has_no_points() {
        assert_eq!(parse_path("   ").unwrap(), Vec::<Point>::new());
    }
}
