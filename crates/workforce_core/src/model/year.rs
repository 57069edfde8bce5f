//! Year cell parsing.
//!
//! Source spreadsheets store years as free text (`"2005"`, `"2005-2008"`,
//! `"fall 2010"`, `"unknown"`). Only a 4-digit run at the start or at the end
//! of the cell counts as a year.

use serde::{Deserialize, Deserializer};

/// Parses one year cell.
///
/// Returns the leading 4 digits when they are all ASCII digits, else the
/// trailing 4 digits, else `None`. Cells of 3 characters or fewer are unknown.
pub fn parse_year_cell(raw: &str) -> Option<i32> {
    let chars = raw.trim().chars().collect::<Vec<_>>();
    if chars.len() <= 3 {
        return None;
    }

    four_digits(&chars[..4]).or_else(|| four_digits(&chars[chars.len() - 4..]))
}

fn four_digits(chars: &[char]) -> Option<i32> {
    if !chars.iter().all(char::is_ascii_digit) {
        return None;
    }
    chars.iter().collect::<String>().parse().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearCell {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Serde adapter accepting integer, float, string or null year cells.
pub fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<YearCell>::deserialize(deserializer)?;
    Ok(cell.and_then(|cell| match cell {
        YearCell::Int(value) => parse_year_cell(&value.to_string()),
        YearCell::Float(value) if value.is_finite() => parse_year_cell(&value.to_string()),
        YearCell::Float(_) => None,
        YearCell::Text(text) => parse_year_cell(&text),
    }))
}

#[cfg(test)]
mod tests {
    use super::parse_year_cell;

    #[test]
    fn leading_digits_win() {
        assert_eq!(parse_year_cell("2005"), Some(2005));
        assert_eq!(parse_year_cell("2005-2008"), Some(2005));
        assert_eq!(parse_year_cell(" 1999 "), Some(1999));
    }

    #[test]
    fn trailing_digits_are_fallback() {
        assert_eq!(parse_year_cell("fall 2010"), Some(2010));
        assert_eq!(parse_year_cell("c.1987"), Some(1987));
    }

    #[test]
    fn short_or_digitless_cells_are_unknown() {
        assert_eq!(parse_year_cell(""), None);
        assert_eq!(parse_year_cell("0"), None);
        assert_eq!(parse_year_cell("nan"), None);
        assert_eq!(parse_year_cell("unknown"), None);
        assert_eq!(parse_year_cell("20x5"), None);
    }
}
