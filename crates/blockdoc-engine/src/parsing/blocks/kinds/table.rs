/// Pipe-delimited table rows: `| a | b |`.
pub struct TableRow;

impl TableRow {
    pub const DELIMITER: char = '|';

    pub fn matches(remainder: &str) -> bool {
        let t = remainder.trim();
        t.len() >= 2 && t.starts_with(Self::DELIMITER) && t.ends_with(Self::DELIMITER)
    }

    /// Splits a row into trimmed cells. `\|` is an escaped pipe inside a cell.
    pub fn cells(remainder: &str) -> Vec<String> {
        let t = remainder.trim();
        let inner = &t[1..t.len() - 1];

        let mut cells = Vec::new();
        let mut current = String::new();
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&Self::DELIMITER) => {
                    current.push(Self::DELIMITER);
                    chars.next();
                }
                Self::DELIMITER => cells.push(std::mem::take(&mut current).trim().to_string()),
                _ => current.push(c),
            }
        }
        cells.push(current.trim().to_string());
        cells
    }

    /// The GFM alignment row: every cell only colons, dashes and spaces,
    /// with at least one dash.
    pub fn is_separator(cells: &[String]) -> bool {
        !cells.is_empty()
            && cells.iter().all(|cell| {
                cell.contains('-') && cell.chars().all(|c| matches!(c, ':' | '-' | ' ' | '\t'))
            })
    }

    /// Escapes pipes so a cell survives a re-split.
    pub fn escape(cell: &str) -> String {
        cell.replace(Self::DELIMITER, "\\|")
    }
}
