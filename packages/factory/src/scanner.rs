//! Data-expression bracket scanner and text-run classification.
//!
//! Text content may embed data expressions delimited by double curly braces
//! (`{{ … }}`) as well as literal markup. [`parse_data_brackets`] is the
//! character-level scanner; [`classify_text`] drives it over a whole run and
//! decides how the run must be instanced.

use thiserror::Error;

/// Malformed data-expression syntax in a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// `{{` encountered while an expression is already open.
    #[error("Opening brackets found inside an open data expression")]
    NestedExpression,

    /// `}}` encountered with no open expression.
    #[error("Closing brackets found outside a data expression")]
    UnbalancedClose,

    /// The run ended with an expression still open.
    #[error("Data expression left open at the end of the text")]
    UnterminatedExpression,
}

/// Advance the bracket scanner by one character.
///
/// The scanner is a pure function of the current inside-expression flag, the
/// current character and the previous one; callers thread the state through,
/// which makes it trivially restartable per text run.
///
/// # Arguments
/// * `inside_brackets` - Whether the cursor is currently inside an expression
/// * `ch` - The current character
/// * `previous` - The previous character (`'\0'` at the start of the run)
///
/// # Returns
/// The updated inside-expression flag.
///
/// # Errors
/// [`ScanError::NestedExpression`] or [`ScanError::UnbalancedClose`] on
/// mismatched bracket pairs. Single unpaired braces are not errors.
pub fn parse_data_brackets(
    inside_brackets: bool,
    ch: char,
    previous: char,
) -> Result<bool, ScanError> {
    if inside_brackets {
        if ch == '{' && previous == '{' {
            return Err(ScanError::NestedExpression);
        }
        if ch == '}' && previous == '}' {
            return Ok(false);
        }
    } else {
        if ch == '{' && previous == '{' {
            return Ok(true);
        }
        if ch == '}' && previous == '}' {
            return Err(ScanError::UnbalancedClose);
        }
    }
    Ok(inside_brackets)
}

/// How a text run must be instanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextClassification {
    /// An unescaped `<` was seen outside any data expression; the run must be
    /// re-parsed as markup.
    pub contains_markup: bool,
    /// At least one character was observed inside a data expression.
    pub contains_expression: bool,
}

/// Scan a full text run and classify it.
///
/// When both markup and a data expression are present the markup takes
/// precedence downstream; expressions embedded in the markup are resolved by
/// the element-level binding pass after re-parsing.
///
/// # Errors
/// Any [`ScanError`] raised by the scanner, plus
/// [`ScanError::UnterminatedExpression`] if the run ends inside an
/// expression.
///
/// # Examples
/// ```
/// use rivet_factory::scanner::classify_text;
///
/// let class = classify_text("Hello {{ name }}").unwrap();
/// assert!(class.contains_expression);
/// assert!(!class.contains_markup);
///
/// assert!(classify_text("{{ unterminated").is_err());
/// ```
pub fn classify_text(text: &str) -> Result<TextClassification, ScanError> {
    let mut classification = TextClassification::default();
    let mut inside_brackets = false;
    let mut previous = '\0';

    for ch in text.chars() {
        inside_brackets = parse_data_brackets(inside_brackets, ch, previous)?;

        if inside_brackets {
            classification.contains_expression = true;
        } else if ch == '<' {
            classification.contains_markup = true;
        }

        previous = ch;
    }

    if inside_brackets {
        return Err(ScanError::UnterminatedExpression);
    }

    Ok(classification)
}

/// Whether a text run consists entirely of whitespace.
#[must_use]
pub fn is_all_whitespace(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
