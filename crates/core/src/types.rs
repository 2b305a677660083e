/// Letter and place identifiers as they appear on the wire and in the CSV files.
pub type RecordId = i64;

/// Letter dates carry no zone information in the archive.
pub type Timestamp = chrono::NaiveDateTime;
