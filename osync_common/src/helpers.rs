/// Returns `None` for missing or whitespace-only strings, and the trimmed value otherwise.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
