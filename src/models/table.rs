//! Listing table and its `;`-delimited text format.

use std::io::{Read, Write};

use crate::error::{AppError, Result};
use crate::models::{Column, ListingRecord};

/// Field separator of the exported files.
pub const DELIMITER: u8 = b';';

/// Ordered collection of listings with a fixed column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingTable {
    rows: Vec<ListingRecord>,
}

impl ListingTable {
    pub fn new(rows: Vec<ListingRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ListingRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose requirements contain `keyword`, ignoring case.
    pub fn filter_requirements(&self, keyword: &str) -> Self {
        Self::new(
            self.rows
                .iter()
                .filter(|record| record.requires(keyword))
                .cloned()
                .collect(),
        )
    }

    /// Serialize with a header row, `;` separators and empty cells for missing values.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_writer(writer);

        csv.write_record(Column::ALL.iter().map(Column::name))?;
        for record in &self.rows {
            csv.write_record(record.to_row())?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Serialize into an in-memory UTF-8 string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| AppError::validation(e.to_string()))
    }

    /// Parse a table previously written by [`ListingTable::write_csv`].
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .from_reader(reader);

        let headers = csv.headers()?;
        let expected: Vec<&str> = Column::ALL.iter().map(Column::name).collect();
        if headers.iter().ne(expected.iter().copied()) {
            return Err(AppError::validation(format!(
                "unexpected header {:?}, expected {:?}",
                headers.iter().collect::<Vec<_>>(),
                expected
            )));
        }

        let mut rows = Vec::new();
        for result in csv.records() {
            let record = result?;
            rows.push(ListingRecord::from_row(record.iter()));
        }
        Ok(Self::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(reference: &str, requirements: Option<&str>) -> ListingRecord {
        ListingRecord {
            title: Some(format!("Oferta {reference}")),
            reference: Some(reference.to_string()),
            requirements: requirements.map(str::to_string),
            hours: Some("Mañanas".to_string()),
            salary: Some("A convenir".to_string()),
            period: Some("01/03/2025 - 31/05/2025".to_string()),
            link: format!("https://example.com/oferta/{reference}"),
            ..ListingRecord::default()
        }
    }

    fn sample_table() -> ListingTable {
        ListingTable::new(vec![
            record("1", Some("Grado en Informática, MÁSTER UNIVERSITARIO EN DATOS MASIVOS")),
            record("2", Some("Grado en Derecho")),
            record("3", Some("máster en ciencia de Datos masivos y Big Data")),
            record("4", None),
        ])
    }

    #[test]
    fn test_header_and_delimiter() {
        let text = ListingTable::default().to_csv_string().unwrap();
        assert_eq!(
            text,
            "title;reference;requirements;hours;tasks;activities;location;salary;type;period;link\n"
        );
    }

    #[test]
    fn test_missing_cells_are_empty() {
        let table = ListingTable::new(vec![ListingRecord::unavailable("https://example.com/x")]);
        let text = table.to_csv_string().unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, ";;;;;;;;;;https://example.com/x");
    }

    #[test]
    fn test_round_trip_by_splitting_lines() {
        let table = sample_table();
        let text = table.to_csv_string().unwrap();

        let rows: Vec<Vec<Option<&str>>> = text
            .lines()
            .skip(1)
            .map(|line| {
                line.split(';')
                    .map(|cell| (!cell.is_empty()).then_some(cell))
                    .collect()
            })
            .collect();

        assert_eq!(rows.len(), table.len());
        for (parsed, original) in rows.iter().zip(table.rows()) {
            let expected: Vec<Option<&str>> =
                Column::ALL.iter().map(|&c| original.cell(c)).collect();
            assert_eq!(parsed, &expected);
        }
    }

    #[test]
    fn test_read_csv_restores_table() {
        let table = sample_table();
        let text = table.to_csv_string().unwrap();
        let parsed = ListingTable::read_csv(text.as_bytes()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_read_csv_rejects_foreign_header() {
        let text = "a;b;c\n1;2;3\n";
        assert!(ListingTable::read_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn test_delimiter_inside_cell_is_quoted() {
        let mut row = record("5", Some("Grado; Máster"));
        row.tasks = Some("Analizar; documentar".to_string());
        let table = ListingTable::new(vec![row]);

        let text = table.to_csv_string().unwrap();
        assert!(text.contains("\"Grado; Máster\""));
        assert_eq!(ListingTable::read_csv(text.as_bytes()).unwrap(), table);
    }

    #[test]
    fn test_filter_keeps_case_insensitive_matches() {
        let table = sample_table();
        let filtered = table.filter_requirements("Datos Masivos");

        let refs: Vec<_> = filtered
            .rows()
            .iter()
            .map(|r| r.reference.as_deref().unwrap())
            .collect();
        assert_eq!(refs, vec!["1", "3"]);
        assert_eq!(filtered.rows()[0], table.rows()[0]);
        assert_eq!(filtered.rows()[1], table.rows()[2]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = sample_table();
        let once = table.filter_requirements("datos masivos");
        let twice = once.filter_requirements("datos masivos");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_is_not_a_regex() {
        let table = sample_table();
        assert!(table.filter_requirements("datos.masivos").is_empty());
    }
}
