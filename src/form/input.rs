//! Terminal prompts for the manual conversion form.
//!
//! Every prompt reads from a caller-supplied reader and writes to a
//! caller-supplied writer so the dialogue can be tested with in-memory
//! buffers.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::convert::{Category, Unit};

/// Present the category menu and read a selection.
///
/// A blank line selects the first category, matching the menu default.
///
/// # Errors
/// Returns an error if the input stream closes or a write fails.
pub fn select_category<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Category> {
    choose(input, output, "Select Unit Category", &Category::ALL)
}

/// Present the unit menu for a category under the given label ("From" or
/// "To") and read a selection.
///
/// # Errors
/// Returns an error if the input stream closes or a write fails.
pub fn select_unit<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    category: Category,
    label: &str,
) -> Result<Unit> {
    choose(input, output, label, category.units())
}

/// Read the value to convert. A blank line selects the default of 1.0.
///
/// # Errors
/// Returns an error if the input stream closes or a write fails.
pub fn read_value<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<f64> {
    loop {
        write!(output, "Enter value for conversion [1.0]: ")?;
        output.flush()?;
        let line = read_line(input)?;
        if line.is_empty() {
            return Ok(1.0);
        }
        match line.parse::<f64>() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "Please enter a number.")?,
        }
    }
}

/// Ask a yes/no question, defaulting to yes. A closed input stream counts
/// as no so a piped session ends cleanly.
///
/// # Errors
/// Returns an error if reading or writing fails.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    write!(output, "{} [Y/n]: ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    let line = line.trim();

    Ok(line.is_empty() || line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes"))
}

/// Print a numbered menu and loop until the user picks a valid entry.
fn choose<T, R, W>(input: &mut R, output: &mut W, label: &str, items: &[T]) -> Result<T>
where
    T: Copy + std::fmt::Display,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", label)?;
    for (index, item) in items.iter().enumerate() {
        writeln!(output, "  {}. {}", index + 1, item)?;
    }

    loop {
        write!(output, "Choice [1]: ")?;
        output.flush()?;
        let line = read_line(input)?;
        if line.is_empty() {
            return Ok(items[0]);
        }
        match line.parse::<usize>() {
            Ok(choice) if (1..=items.len()).contains(&choice) => return Ok(items[choice - 1]),
            _ => writeln!(output, "Please enter a number between 1 and {}.", items.len())?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("Input closed");
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_select_category_by_number() {
        let mut input = Cursor::new(b"3\n");
        let mut output = Vec::new();

        let category = select_category(&mut input, &mut output).unwrap();

        assert_eq!(category, Category::Temperature);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Select Unit Category"));
        assert!(text.contains("1. Length"));
        assert!(text.contains("5. Volume"));
    }

    #[test]
    fn test_select_category_default_on_blank() {
        let mut input = Cursor::new(b"\n");
        let mut output = Vec::new();
        assert_eq!(select_category(&mut input, &mut output).unwrap(), Category::Length);
    }

    #[test]
    fn test_select_category_reprompts_on_garbage() {
        let mut input = Cursor::new(b"nine\n0\n2\n");
        let mut output = Vec::new();

        assert_eq!(select_category(&mut input, &mut output).unwrap(), Category::Weight);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("between 1 and 5").count(), 2);
    }

    #[test]
    fn test_select_unit_label_and_choice() {
        let mut input = Cursor::new(b"2\n");
        let mut output = Vec::new();

        let unit = select_unit(&mut input, &mut output, Category::Temperature, "From").unwrap();

        assert_eq!(unit, Unit::Fahrenheit);
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("From\n"));
        assert!(text.contains("3. Kelvin"));
    }

    #[test]
    fn test_read_value_defaults_to_one() {
        let mut input = Cursor::new(b"\n");
        let mut output = Vec::new();
        assert_eq!(read_value(&mut input, &mut output).unwrap(), 1.0);
    }

    #[test]
    fn test_read_value_parses_and_reprompts() {
        let mut input = Cursor::new(b"abc\n72.5\n");
        let mut output = Vec::new();

        assert_eq!(read_value(&mut input, &mut output).unwrap(), 72.5);
        assert!(String::from_utf8(output).unwrap().contains("Please enter a number."));
    }

    #[test]
    fn test_confirm_variants() {
        let cases: [(&[u8], bool); 6] =
            [(b"\n", true), (b"y\n", true), (b"Yes\n", true), (b"n\n", false), (b"no\n", false), (b"", false)];
        for (bytes, expected) in cases {
            let mut input = Cursor::new(bytes);
            let mut output = Vec::new();
            let answer = confirm(&mut input, &mut output, "Convert another?").unwrap();
            assert_eq!(answer, expected, "input {:?}", bytes);
        }
    }

    #[test]
    fn test_select_category_errors_on_closed_input() {
        let mut input = Cursor::new(b"");
        let mut output = Vec::new();
        assert!(select_category(&mut input, &mut output).is_err());
    }
}
