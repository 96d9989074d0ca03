//! Ingestion of user-supplied financial statements as plain delimited tables.
//!
//! No schema is imposed: any header row and any number of columns is accepted. The
//! table is only rendered back to text so it can be embedded in an analysis prompt.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatementTable {
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::from_csv_reader(data.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table with a leading row-index column, right-aligned like a dataframe print.
    pub fn to_text(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let mut col_widths = vec![0usize; width];
        for (idx, header) in self.headers.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(header.chars().count());
        }
        for row in &self.rows {
            for (idx, field) in row.iter().enumerate() {
                col_widths[idx] = col_widths[idx].max(field.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&" ".repeat(index_width));
        for (idx, w) in col_widths.iter().enumerate() {
            let header = self.headers.get(idx).map(String::as_str).unwrap_or("");
            out.push_str(&format!("  {:>w$}", header, w = *w));
        }
        out.push('\n');

        for (row_idx, row) in self.rows.iter().enumerate() {
            out.push_str(&format!("{:<w$}", row_idx, w = index_width));
            for (idx, w) in col_widths.iter().enumerate() {
                let field = row.get(idx).map(String::as_str).unwrap_or("");
                out.push_str(&format!("  {:>w$}", field, w = *w));
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountingError;

    const SAMPLE: &str = "Account,2022,2023\nRevenue,1000,1200\nCost of Sales,400,450\n";

    #[test]
    fn test_reads_headers_and_rows() {
        let table = StatementTable::from_csv_str(SAMPLE).unwrap();
        assert_eq!(table.headers, vec!["Account", "2022", "2023"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "Cost of Sales");
        assert!(!table.is_empty());
    }

    #[test]
    fn test_text_rendering() {
        let table = StatementTable::from_csv_str(SAMPLE).unwrap();
        let text = table.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "         Account  2022  2023");
        assert_eq!(lines[1], "0        Revenue  1000  1200");
        assert_eq!(lines[2], "1  Cost of Sales   400   450");
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let table = StatementTable::from_csv_str("a,b\n1\n2,3,4\n").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.to_text().lines().count(), 3);
    }

    #[test]
    fn test_invalid_utf8_is_a_csv_error() {
        let data: &[u8] = b"Account,\xff\xfe\nRevenue,1000\n";
        let result = StatementTable::from_csv_reader(data);
        assert!(matches!(result, Err(AccountingError::CsvError(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let table = StatementTable::from_csv_str("a,b\n").unwrap();
        assert!(table.is_empty());
    }
}
