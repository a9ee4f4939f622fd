/// One line of text flowing through a pipeline, terminator included.
///
/// A final line without a terminator is kept as is, so writing every record
/// back in order reproduces the source byte for byte.
pub type Record = String;

/// Splits a record into its body and its line terminator (`"\n"`, `"\r\n"` or
/// empty for an unterminated final line).
#[inline]
pub fn split_terminator(record: &str) -> (&str, &str) {
    if let Some(body) = record.strip_suffix("\r\n") {
        (body, &record[body.len()..])
    } else if let Some(body) = record.strip_suffix('\n') {
        (body, &record[body.len()..])
    } else {
        (record, "")
    }
}
