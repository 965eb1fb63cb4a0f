#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_system;

extern crate regex;

/// Byte offset into a named source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line's text and the offset of
/// `position` within that line, or `None` if the offset is past the end.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    const CONTENT: &str = "Hello, world!\nlet x = 1\n\n  Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(CONTENT, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(CONTENT, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "  Testing { }\n");
        assert_eq!(line_pos, 9);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position(CONTENT, 500).is_none());
    }

    #[test]
    fn test_remove_starting_whitespace() {
        let (text, removed) = super::remove_starting_whitespace("    let x");
        assert_eq!(text, "let x");
        assert_eq!(removed, 4);
    }
}

/// Prints an error with the offending source line and a caret under the
/// reported position.
pub fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        Error: UnknownVariable (Variable `y` is not declared in this scope)
        -> main.hb
           |
        20 | let a = y + 1
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file.as_os_str().to_string_lossy());

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0) else {
        eprintln!("   {}", error);
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let trimmed = string.trim_start_matches(' ');
    (String::from(trimmed), string.len() - trimmed.len())
}
