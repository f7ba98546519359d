use std::collections::HashMap;

use csv::StringRecord;

/// A data row keyed by the trimmed names of its sheet's header row.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, String>,
    order: Vec<String>,
}

impl Row {
    pub fn headers(record: &StringRecord) -> Vec<String> {
        record.iter().map(|field| field.trim().to_string()).collect()
    }

    /// Pairs header names with the record's values. Missing trailing values stay absent and
    /// values past the last header are dropped.
    pub fn associate(headers: &[String], record: &StringRecord) -> Self {
        let mut fields = HashMap::with_capacity(headers.len());
        let mut order = Vec::with_capacity(headers.len());
        for (header, value) in headers.iter().zip(record.iter()) {
            if fields.insert(header.clone(), value.to_string()).is_none() {
                order.push(header.clone());
            }
        }
        Self { fields, order }
    }

    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Non-empty values whose header contains `needle` (ASCII case-insensitive), in header order.
    pub fn find_containing<'a>(&'a self, needle: &str) -> impl Iterator<Item = &'a str> + 'a {
        let needle = needle.to_ascii_lowercase();
        self.order
            .iter()
            .filter(move |header| header.to_ascii_lowercase().contains(&needle))
            .map(|header| self.get(header))
            .filter(|value| !value.is_empty())
    }
}

/// Reader for the spreadsheet's TSV export, which never quotes fields.
pub(crate) fn tsv_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes())
}

/// 1-based line of the sheet a record started on. Blank lines are skipped by the reader but
/// still counted here.
pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or_default()
}
