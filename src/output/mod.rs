//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json_list(self)?),
        }
    }
}

/// Print a single record as `FIELD  value` lines, or JSON
pub fn print_record<T: Serialize>(
    rows: &[(&str, String)],
    data: &T,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table::format_record(rows)),
        OutputFormat::Json => println!("{}", json::format_json(data)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "NUMBER")]
        number: String,
    }

    #[test]
    fn test_vec_formats_as_table_and_json() {
        let rows = vec![Row {
            number: "+15550100".to_string(),
        }];

        let table = rows.format(OutputFormat::Table).unwrap();
        assert!(table.contains("NUMBER"));
        assert!(table.contains("+15550100"));

        let json = rows.format(OutputFormat::Json).unwrap();
        assert!(json.contains("\"count\": 1"));
    }
}
