//! The textual command grammar: `name(arg1[,arg2...])`.
//!
//! A command is ASCII text with a case-sensitive name, a single pair of
//! parentheses, and comma-separated numeric arguments.  There is no
//! whitespace tolerance: `keyPress (65)` is not a valid command.  Multiple
//! commands travel together in a batch joined by `;` (one TCP line or one
//! UDP datagram); [`split_batch`] separates them.
//!
//! Key and button codes are plain integers and are passed through without
//! semantic validation.  Coordinates accept decimals and are truncated
//! toward zero, so `mouseMove(10.9,-3.7)` targets `(10, -3)`.

use thiserror::Error;

/// Error type for command parsing.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    /// The text does not have the `name(arg[,arg])` shape.
    #[error("invalid command {text:?}: format must be name(arg[,arg])")]
    InvalidFormat { text: String },

    /// An argument is missing or could not be parsed as the required
    /// numeric type.
    #[error("invalid command {text:?}: invalid numeric argument")]
    InvalidArgument {
        text: String,
        #[source]
        source: ArgError,
    },

    /// The command name is not in the supported set.
    #[error("unknown command: {name}")]
    Unknown { name: String },
}

/// The underlying cause of an [`CommandError::InvalidArgument`].
#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    /// Fewer arguments were supplied than the command requires.
    #[error("argument {index} is missing")]
    Missing { index: usize },

    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),

    #[error(transparent)]
    Float(#[from] std::num::ParseFloatError),
}

/// One parsed command, ready for dispatch to an input injector.
///
/// Coordinate-carrying variants store the already-truncated integer values;
/// the fractional part of a decimal argument never survives parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `keyPress(code)` – press (and hold) a key.
    KeyPress(i32),
    /// `keyRelease(code)` – release a previously pressed key.
    KeyRelease(i32),
    /// `mouseMove(x,y)` – move the pointer to an absolute position.
    MouseMove { x: i32, y: i32 },
    /// `mouseMoveRelative(dx,dy)` – a drag delta; the pointer moves by the
    /// *negation* of the delta from its current position.
    MouseMoveRelative { dx: i32, dy: i32 },
    /// `mousePress(button)` – press (and hold) a mouse button.
    MousePress(i32),
    /// `mouseRelease(button)` – release a previously pressed button.
    MouseRelease(i32),
    /// `mouseWheel(notches)` – spin the wheel; positive is toward the user.
    MouseWheel(i32),
}

impl Command {
    /// Parses one command from `text`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidFormat`] when the parentheses are
    /// missing, unbalanced, nested, or followed by trailing text;
    /// [`CommandError::Unknown`] for an unrecognized name; and
    /// [`CommandError::InvalidArgument`] when an argument is missing or not
    /// numeric.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let (name, rest) = text
            .split_once('(')
            .ok_or_else(|| CommandError::InvalidFormat { text: text.into() })?;

        // Exactly one '(' and exactly one ')', which must be the final
        // character.  Anything else is a malformed command, including
        // nested parentheses and trailing text.
        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| CommandError::InvalidFormat { text: text.into() })?;
        if inner.contains('(') || inner.contains(')') {
            return Err(CommandError::InvalidFormat { text: text.into() });
        }

        let args = Args { text, parts: inner.split(',').collect() };

        match name {
            "keyPress" => Ok(Command::KeyPress(args.int(0)?)),
            "keyRelease" => Ok(Command::KeyRelease(args.int(0)?)),
            "mouseMove" => Ok(Command::MouseMove { x: args.coord(0)?, y: args.coord(1)? }),
            "mouseMoveRelative" => {
                Ok(Command::MouseMoveRelative { dx: args.coord(0)?, dy: args.coord(1)? })
            }
            "mousePress" => Ok(Command::MousePress(args.int(0)?)),
            "mouseRelease" => Ok(Command::MouseRelease(args.int(0)?)),
            "mouseWheel" => Ok(Command::MouseWheel(args.int(0)?)),
            _ => Err(CommandError::Unknown { name: name.into() }),
        }
    }
}

/// Splits one batch (a TCP line or a UDP datagram payload) into individual
/// command strings, skipping empty segments so a trailing `;` is harmless.
pub fn split_batch(batch: &str) -> impl Iterator<Item = &str> {
    batch.split(';').filter(|piece| !piece.is_empty())
}

/// The comma-separated argument list of one command.
struct Args<'a> {
    text: &'a str,
    parts: Vec<&'a str>,
}

impl Args<'_> {
    fn get(&self, index: usize) -> Result<&str, CommandError> {
        self.parts
            .get(index)
            .copied()
            .ok_or_else(|| CommandError::InvalidArgument {
                text: self.text.into(),
                source: ArgError::Missing { index },
            })
    }

    /// Parses argument `index` as an integer key/button/notch code.
    fn int(&self, index: usize) -> Result<i32, CommandError> {
        self.get(index)?
            .parse::<i32>()
            .map_err(|e| CommandError::InvalidArgument {
                text: self.text.into(),
                source: e.into(),
            })
    }

    /// Parses argument `index` as a coordinate: a decimal number truncated
    /// toward zero.
    fn coord(&self, index: usize) -> Result<i32, CommandError> {
        self.get(index)?
            .parse::<f64>()
            .map(|v| v as i32)
            .map_err(|e| CommandError::InvalidArgument {
                text: self.text.into(),
                source: e.into(),
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Well-formed commands ──────────────────────────────────────────────────

    #[test]
    fn test_parse_key_press() {
        assert_eq!(Command::parse("keyPress(65)"), Ok(Command::KeyPress(65)));
    }

    #[test]
    fn test_parse_key_release() {
        assert_eq!(Command::parse("keyRelease(65)"), Ok(Command::KeyRelease(65)));
    }

    #[test]
    fn test_parse_mouse_move() {
        assert_eq!(
            Command::parse("mouseMove(10,20)"),
            Ok(Command::MouseMove { x: 10, y: 20 })
        );
    }

    #[test]
    fn test_parse_mouse_move_relative() {
        assert_eq!(
            Command::parse("mouseMoveRelative(-5,3)"),
            Ok(Command::MouseMoveRelative { dx: -5, dy: 3 })
        );
    }

    #[test]
    fn test_parse_mouse_press_and_release() {
        assert_eq!(Command::parse("mousePress(1)"), Ok(Command::MousePress(1)));
        assert_eq!(Command::parse("mouseRelease(1)"), Ok(Command::MouseRelease(1)));
    }

    #[test]
    fn test_parse_mouse_wheel() {
        assert_eq!(Command::parse("mouseWheel(-2)"), Ok(Command::MouseWheel(-2)));
    }

    #[test]
    fn test_parse_negative_key_code_is_accepted() {
        // Codes are not validated semantically; any integer passes.
        assert_eq!(Command::parse("keyPress(-1)"), Ok(Command::KeyPress(-1)));
    }

    #[test]
    fn test_parse_extra_arguments_are_ignored() {
        // The original relay reads only the arguments it needs.
        assert_eq!(Command::parse("keyPress(65,66)"), Ok(Command::KeyPress(65)));
    }

    // ── Coordinate truncation ─────────────────────────────────────────────────

    #[test]
    fn test_coordinates_accept_decimals_and_truncate_toward_zero() {
        assert_eq!(
            Command::parse("mouseMove(10.9,20.1)"),
            Ok(Command::MouseMove { x: 10, y: 20 })
        );
    }

    #[test]
    fn test_negative_coordinates_truncate_toward_zero() {
        // -3.7 truncates to -3, not -4.
        assert_eq!(
            Command::parse("mouseMoveRelative(-3.7,-0.9)"),
            Ok(Command::MouseMoveRelative { dx: -3, dy: 0 })
        );
    }

    #[test]
    fn test_key_codes_reject_decimals() {
        // Key/button codes are integers; a decimal is an invalid argument.
        assert!(matches!(
            Command::parse("keyPress(1.5)"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    // ── Malformed text ────────────────────────────────────────────────────────

    #[test]
    fn test_missing_parentheses_is_invalid_format() {
        assert!(matches!(
            Command::parse("badcommand"),
            Err(CommandError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_missing_closing_paren_is_invalid_format() {
        assert!(matches!(
            Command::parse("keyPress(65"),
            Err(CommandError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_text_after_closing_paren_is_invalid_format() {
        assert!(matches!(
            Command::parse("keyPress(65)x"),
            Err(CommandError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_nested_parentheses_are_invalid_format() {
        assert!(matches!(
            Command::parse("keyPress((65))"),
            Err(CommandError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_double_closing_paren_is_invalid_format() {
        assert!(matches!(
            Command::parse("keyPress(65))"),
            Err(CommandError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_empty_string_is_invalid_format() {
        assert!(matches!(
            Command::parse(""),
            Err(CommandError::InvalidFormat { .. })
        ));
    }

    // ── Unknown names ─────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(
            Command::parse("selfDestruct(1)"),
            Err(CommandError::Unknown { name: "selfDestruct".into() })
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(matches!(
            Command::parse("KEYPRESS(65)"),
            Err(CommandError::Unknown { .. })
        ));
        assert!(matches!(
            Command::parse("keypress(65)"),
            Err(CommandError::Unknown { .. })
        ));
    }

    #[test]
    fn test_whitespace_around_parentheses_is_not_tolerated() {
        // "keyPress " is not a known name.
        assert!(matches!(
            Command::parse("keyPress (65)"),
            Err(CommandError::Unknown { .. })
        ));
    }

    // ── Argument errors ───────────────────────────────────────────────────────

    #[test]
    fn test_empty_argument_list_is_invalid_argument() {
        assert!(matches!(
            Command::parse("keyPress()"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_non_numeric_argument_is_invalid_argument() {
        assert!(matches!(
            Command::parse("keyPress(abc)"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_whitespace_inside_argument_is_invalid_argument() {
        assert!(matches!(
            Command::parse("keyPress( 65)"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_missing_second_coordinate_is_invalid_argument() {
        let err = Command::parse("mouseMove(10)").unwrap_err();
        assert!(matches!(
            err,
            CommandError::InvalidArgument { source: ArgError::Missing { index: 1 }, .. }
        ));
    }

    // ── Batch splitting ───────────────────────────────────────────────────────

    #[test]
    fn test_split_batch_separates_commands() {
        let pieces: Vec<&str> = split_batch("mousePress(1);mouseRelease(1)").collect();
        assert_eq!(pieces, vec!["mousePress(1)", "mouseRelease(1)"]);
    }

    #[test]
    fn test_split_batch_ignores_trailing_separator() {
        let pieces: Vec<&str> = split_batch("mouseMove(10,20);").collect();
        assert_eq!(pieces, vec!["mouseMove(10,20)"]);
    }

    #[test]
    fn test_split_batch_ignores_empty_segments() {
        let pieces: Vec<&str> = split_batch(";;keyPress(65);;keyRelease(65);").collect();
        assert_eq!(pieces, vec!["keyPress(65)", "keyRelease(65)"]);
    }

    #[test]
    fn test_split_batch_of_empty_string_yields_nothing() {
        assert_eq!(split_batch("").count(), 0);
    }
}
