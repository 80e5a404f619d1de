//! CSV rendering for registration exports
//!
//! Every cell is quoted, including the header. Embedded quotes are doubled
//! and `\r\n` line breaks collapse to `\n` inside the quoted cell. Rows are
//! joined with `\n` and the document has no trailing newline.

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::db::Registration;

/// Exported columns, in output order.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "id",
    "name",
    "email",
    "company",
    "date",
    "ip",
    "user_agent",
    "ip_country",
    "ip_region",
    "created_at",
];

/// CSV rendering error
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Cell text with `\r\n` collapsed to `\n`; `None` is empty.
fn cell(value: Option<&str>) -> String {
    value.unwrap_or_default().replace("\r\n", "\n")
}

fn record(r: &Registration) -> [String; 10] {
    [
        r.id.to_string(),
        cell(Some(r.name.as_str())),
        cell(r.email.as_deref()),
        cell(r.company.as_deref()),
        cell(Some(r.date.as_str())),
        cell(r.ip.as_deref()),
        cell(r.user_agent.as_deref()),
        cell(r.ip_country.as_deref()),
        cell(r.ip_region.as_deref()),
        r.created_at.to_rfc3339(),
    ]
}

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

/// Render registrations (already ordered) as a CSV document.
pub fn render_registrations(rows: &[Registration]) -> Result<String, RenderError> {
    let mut wtr = writer();

    wtr.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        wtr.write_record(record(row))?;
    }

    let mut bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    // Drop the terminator after the last row.
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    Ok(String::from_utf8(bytes)?)
}
