//! Rendering helpers for converted records.

/// Re-flow a serialized record so each visual row of the layout table starts
/// on its own line. Everything outside the `"layout":[...]` span is left
/// untouched, so the output is still valid JSON.
pub fn format_record(record: &str) -> String {
    let Some(start) = record.find("\"layout\":[") else {
        return record.to_string();
    };
    let Some(end) = record[start..].find(']').map(|i| start + i) else {
        return record.to_string();
    };

    let mut formatted = String::with_capacity(record.len() + 16);
    formatted.push_str(&record[..start]);
    formatted.push_str(&record[start..=end].replace(",0,", ",0,\n"));
    formatted.push_str(&record[end + 1..]);
    formatted
}
