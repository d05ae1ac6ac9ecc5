/// Extracts the custom program error code from a transaction error message.
pub fn parse_custom_error_code(message: &str) -> Option<u32> {
    const MARKER: &str = "custom program error: 0x";

    let start = message.find(MARKER)? + MARKER.len();
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();

    u32::from_str_radix(&digits, 16).ok()
}

/// Appends the decimal program error code, when there is one, to an error
/// message.
pub fn parse_tool_errors(message: &str) -> String {
    match parse_custom_error_code(message) {
        Some(code) => format!("{} (program error code {})", message, code),
        None => message.to_string(),
    }
}
