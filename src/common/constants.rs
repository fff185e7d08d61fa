// field constants
/// Reserved field name addressing the document key instead of document data.
pub const KEY_FIELD_NAME: &str = "__name__";
