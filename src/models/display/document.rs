//! Knowledge-base document display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Document;
use crate::output::formatters::{format_timestamp_local, or_dash};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DocumentDisplay {
    #[tabled(rename = "DOCUMENT ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "UPLOADED")]
    pub uploaded: String,
}

impl From<Document> for DocumentDisplay {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            size: doc.size.map(format_size).unwrap_or_else(|| "-".to_string()),
            status: or_dash(doc.status.as_deref()),
            uploaded: format_timestamp_local(doc.created_at.as_deref()),
        }
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
