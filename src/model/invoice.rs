use std::fmt::Display;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// An invoice id is either a string or a number in the uploaded document.
/// Numbers are kept as numbers so they are stored with the `N` type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvoiceId {
    Text(String),
    Number(serde_json::Number),
}

impl Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceId::Text(id) => write!(f, "{id}"),
            InvoiceId::Number(id) => write!(f, "{id}"),
        }
    }
}

/// A single element of the uploaded invoice document. Every field is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub cliente: String,
    pub valor: serde_json::Number,
    /// Not validated, stored as received
    pub data_emissao: String,
}

/// The table item written for each [InvoiceRecord]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistedItem {
    pub id: InvoiceId,
    pub cliente: String,
    /// The amount as the document wrote it, no rounding applied
    pub valor: String,
    pub data_emissao: String,
}

impl From<InvoiceRecord> for PersistedItem {
    fn from(record: InvoiceRecord) -> Self {
        PersistedItem {
            id: record.id,
            cliente: record.cliente,
            valor: record.valor.to_string(),
            data_emissao: record.data_emissao,
        }
    }
}

/// Parses the uploaded document, failing on the first malformed element
pub fn parse_invoices(content: &str) -> anyhow::Result<Vec<InvoiceRecord>> {
    serde_json::from_str(content).context("failed to deserialize invoice document")
}
