//! Rendering of lookup results.

use std::io::{self, Write};

use crate::AsRecord;

/// How records are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Every field, labeled, in declaration order
    #[default]
    Raw,
    /// One English sentence per record
    HumanReadable,
}

impl OutputFormat {
    /// `HumanReadable` when `-r` was given, `Raw` otherwise
    pub fn from_flag(human_readable: bool) -> Self {
        if human_readable {
            OutputFormat::HumanReadable
        } else {
            OutputFormat::Raw
        }
    }
}


/// Render a record as a single line without trailing newline
///
/// The raw format is the record's `Debug` form, which quotes and escapes every value so nothing
/// from the server answer is lost.
///
pub fn render(record: &AsRecord, format: OutputFormat) -> String {
    match format {
        OutputFormat::HumanReadable => format!(
            "IP {} is in AS{} (prefix {}), belongs to {} and is assigned since {} to {}",
            record.query_address(),
            record.as_number(),
            record.bgp_prefix(),
            record.registry(),
            record.allocated(),
            record.as_name()
        ),
        OutputFormat::Raw => format!("{:?}", record),
    }
}

/// Write a rendered record followed by a newline
pub fn present<W: Write>(out: &mut W, record: &AsRecord, format: OutputFormat) -> io::Result<()> {
    writeln!(out, "{}", render(record, format))
}
