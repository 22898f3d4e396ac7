//! Boot command-line parsing helpers.
//!
//! The command line is a whitespace-separated list of `key=value` tokens.
//! Each subsystem builds its own configuration from it; these helpers keep
//! the spelling of booleans and numbers the same everywhere.

/// Parse a boolean switch value.
pub fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("on")
        || value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("yes")
        || value.eq_ignore_ascii_case("enabled")
        || value == "1"
    {
        Some(true)
    } else if value.eq_ignore_ascii_case("off")
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("disabled")
        || value == "0"
    {
        Some(false)
    } else {
        None
    }
}

/// Parse a hexadecimal number, with or without a `0x`/`0X` prefix.
pub fn parse_hex_u64(value: &str) -> Option<u64> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Iterate over the values of every `key=value` token whose key is `key`.
pub fn values<'a>(cmdline: &'a str, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    cmdline.split_whitespace().filter_map(move |token| {
        token
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix('='))
    })
}

/// The value of the last `key=value` token for `key`, if any.
pub fn last_value<'a>(cmdline: &'a str, key: &'a str) -> Option<&'a str> {
    values(cmdline, key).last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_spellings() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("enabled"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex_u64("0xE0000"), Some(0xE0000));
        assert_eq!(parse_hex_u64("fffff"), Some(0xFFFFF));
        assert_eq!(parse_hex_u64("0x"), None);
        assert_eq!(parse_hex_u64("xyz"), None);
    }

    #[test]
    fn test_last_value_wins() {
        let cmdline = "quiet acpi.checksums=off klog=debug acpi.checksums=on";
        assert_eq!(last_value(cmdline, "acpi.checksums"), Some("on"));
        assert_eq!(last_value(cmdline, "klog"), Some("debug"));
        assert_eq!(last_value(cmdline, "acpi"), None);
        assert_eq!(last_value(cmdline, "quiet"), None);
    }
}
