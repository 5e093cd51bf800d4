//! Minimal CSV reading and writing for manifest files
//!
//! Fields containing commas, quotes, or newlines are quoted; quotes inside
//! quoted fields double. The reader maps rows onto the header line. This is
//! all the tabular format the manifests need.

use std::collections::BTreeMap;

/// Serialize rows under a header line
pub fn write_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = row.iter().map(|field| quote_field(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse CSV content into header-keyed records; empty lines are skipped
pub fn parse(content: &str) -> Vec<BTreeMap<String, String>> {
    let mut lines = split_records(content).into_iter();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = parse_record(&header_line);

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields = parse_record(&line);
            headers
                .iter()
                .cloned()
                .zip(fields.into_iter().chain(std::iter::repeat(String::new())))
                .collect()
        })
        .collect()
}

/// Split content into records, keeping newlines inside quoted fields
fn split_records(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in content.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '\n' if !in_quotes => {
                records.push(std::mem::take(&mut current));
            }
            '\r' if !in_quotes => {}
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        records.push(current);
    }
    records
}

fn parse_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
