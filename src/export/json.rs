use std::io::Write;

use super::ExportError;
use crate::simulation::Trace;

/// Pretty-printed array of `{ "day": n, "trips": [...] }` objects.
pub fn write_json<W: Write>(writer: W, trace: &Trace) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, trace)?;
    Ok(())
}
