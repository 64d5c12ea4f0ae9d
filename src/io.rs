//! Reading and writing integer sequences
//!
//! Input is a list of signed integers separated by whitespace and/or commas.
//! Output is the same values separated by single spaces, one line.

use crate::diagnostics::{SortError, SourceFile};
use std::fmt::Display;
use std::io::{Read, Write};
use std::path::Path;

/// Sequence sorted by `bsort demo`
pub const DEMO_SEQUENCE: [i64; 8] = [3, 7, 4, 8, 6, 2, 1, 5];

/// Parse every integer in `source`.
///
/// # Errors
///
/// [`SortError::InvalidElement`] pointing at the first token that is not a
/// signed 64-bit integer.
pub fn parse_sequence(source: &SourceFile) -> Result<Vec<i64>, SortError> {
    let text: &str = &source.content;
    let mut values = Vec::new();
    let mut start = None;

    let end = std::iter::once((text.len(), ' '));
    for (offset, ch) in text.char_indices().chain(end) {
        if ch.is_whitespace() || ch == ',' {
            if let Some(begin) = start.take() {
                values.push(parse_token(source, begin, &text[begin..offset])?);
            }
        } else if start.is_none() {
            start = Some(offset);
        }
    }

    Ok(values)
}

fn parse_token(source: &SourceFile, offset: usize, token: &str) -> Result<i64, SortError> {
    token.parse().map_err(|_| SortError::InvalidElement {
        token: token.to_string(),
        span: (offset, token.len()).into(),
        src: source.to_named_source(),
    })
}

/// Render `values` space-separated
pub fn format_sequence<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read `path`, or stdin when `None`
pub fn read_input(path: Option<&Path>) -> Result<SourceFile, SortError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| SortError::io(path, e))?;
            Ok(SourceFile::new(path.display().to_string(), content))
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| SortError::io("<stdin>", e))?;
            Ok(SourceFile::new("<stdin>", content))
        }
    }
}

/// Write `line` and a newline to `path`, or stdout when `None`
pub fn write_output(path: Option<&Path>, line: &str) -> Result<(), SortError> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{line}\n")).map_err(|e| SortError::io(path, e))?;
            tracing::info!("Wrote result to {:?}", path);
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{line}").map_err(|e| SortError::io("<stdout>", e))
        }
    }
}

/// Sort [`DEMO_SEQUENCE`] and write an `Input:` and an `Output:` line to `out`
pub fn write_demo<W: Write>(out: &mut W) -> Result<(), SortError> {
    let mut values = DEMO_SEQUENCE;
    let input = format_sequence(&values);
    crate::sort(&mut values)?;
    let output = format_sequence(&values);

    writeln!(out, "Input:  {input}")
        .and_then(|()| writeln!(out, "Output: {output}"))
        .map_err(|e| SortError::io("<stdout>", e))
}
