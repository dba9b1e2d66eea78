/// One non-empty data line of an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// 1-based position among the non-empty data lines.
    pub number: usize,
    pub values: Vec<String>,
}

impl CsvRow {
    /// Trimmed cell at `index`; missing and blank cells are `None`.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// Splits one line on commas that are not inside double quotes.
///
/// Quote characters only toggle the quoted state and are not kept, so `""` inside
/// a quoted field yields nothing rather than a literal quote. Fields are trimmed.
pub fn split_record(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());
    values
}

/// Parses raw upload text. The first non-empty line is the header row; blank
/// lines are skipped and never numbered. Returns `None` when there is no header.
pub fn parse_document(text: &str) -> Option<CsvDocument> {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let header_line = lines.next()?;
    let headers = split_record(header_line.trim_start_matches('\u{feff}'));

    let rows = lines
        .enumerate()
        .map(|(i, line)| CsvRow {
            number: i + 1,
            values: split_record(line),
        })
        .collect();

    Some(CsvDocument { headers, rows })
}
