//! Utilities.
use std::path::Path;

/// Formats an integer with thousands separators, e.g., `100000` to `"100,000"`.
pub fn with_thousands_sep(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Returns `path` as a string for libraries taking paths as strings.
pub fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_thousands_sep() {
        assert_eq!(with_thousands_sep(0), "0");
        assert_eq!(with_thousands_sep(999), "999");
        assert_eq!(with_thousands_sep(20_000), "20,000");
        assert_eq!(with_thousands_sep(1_234_567), "1,234,567");
    }
}
