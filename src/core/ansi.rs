//! ANSI escape removal for sinks that must stay uncolored

/// Remove ANSI escape sequences from `input`.
///
/// Covers color (CSI) sequences as well as OSC sequences such as terminal
/// hyperlinks; incomplete trailing sequences are dropped.
#[must_use]
pub fn strip_ansi(input: &str) -> String {
    if !input.contains('\x1b') {
        return input.to_string();
    }
    strip_ansi_escapes::strip_str(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_ansi("APP 01/02, 03:04:05: [INFO] hi"), "APP 01/02, 03:04:05: [INFO] hi");
    }

    #[test]
    fn test_strips_color_sequences() {
        let colored = "\x1b[45;97m01/02, 03:04:05\x1b[0m: [\x1b[91mERROR\x1b[0m] boom";
        assert_eq!(strip_ansi(colored), "01/02, 03:04:05: [ERROR] boom");
    }

    #[test]
    fn test_truncated_sequence_does_not_panic() {
        assert_eq!(strip_ansi("abc\x1b[31"), "abc");
        assert_eq!(strip_ansi("abc\x1b"), "abc");
    }

    #[test]
    fn test_multibyte_text_preserved() {
        assert_eq!(strip_ansi("\x1b[32mhéllo ✓\x1b[0m"), "héllo ✓");
    }

    #[test]
    fn test_strips_hyperlink_sequences() {
        let linked = "\x1b]8;;http://x\x1b\\link\x1b]8;;\x1b\\ done";
        assert_eq!(strip_ansi(linked), "link done");
    }
}
