//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format one record as aligned `FIELD  value` lines
pub fn format_record(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{:<width$}  {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct AssistantRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "NAME")]
        name: String,
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<AssistantRow> = vec![];
        assert_eq!(format_table(&items), "No results found.");
    }

    #[test]
    fn test_format_table_rows() {
        let items = vec![
            AssistantRow {
                id: "asst-1".to_string(),
                name: "Ava".to_string(),
            },
            AssistantRow {
                id: "asst-2".to_string(),
                name: "Rex".to_string(),
            },
        ];

        let result = format_table(&items);
        assert!(result.contains("NAME"));
        assert!(result.contains("asst-1"));
        assert!(result.contains("Rex"));
    }

    #[test]
    fn test_format_record_aligns_keys() {
        let result = format_record(&[
            ("ID", "asst-1".to_string()),
            ("TEMPERATURE", "0.5".to_string()),
        ]);
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines[0], "ID           asst-1");
        assert_eq!(lines[1], "TEMPERATURE  0.5");
    }
}
