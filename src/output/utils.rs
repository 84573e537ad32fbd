//! Shared utility functions for output formatting

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Format a size in bytes to a compact human-readable form for tree lines.
pub fn format_size(bytes: u64) -> String {
    if bytes >= TB {
        format!("{:.1}T", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a size with two decimals, for the summary line.
/// Sizes under 1K are left to the exact byte count.
pub fn format_size_precise(bytes: u64) -> Option<String> {
    let (unit, suffix) = if bytes >= TB {
        (TB, 'T')
    } else if bytes >= GB {
        (GB, 'G')
    } else if bytes >= MB {
        (MB, 'M')
    } else if bytes >= KB {
        (KB, 'K')
    } else {
        return None;
    };
    Some(format!("{:.2}{}", bytes as f64 / unit as f64, suffix))
}

/// Format a number with thousand separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// "1 file", "3 files".
pub fn plural(n: u64, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", format_number(n), singular)
    } else {
        format!("{} {}", format_number(n), plural)
    }
}

/// Build the tree-drawing prefix for an entry.
///
/// `ancestors_last[i]` tells whether the ancestor at depth `i + 1` was the
/// last child of its parent.
pub fn branch_prefix(ancestors_last: &[bool], is_last: bool) -> String {
    let mut prefix = String::new();
    for &last in ancestors_last {
        prefix.push_str(if last { "    " } else { "│   " });
    }
    prefix.push_str(if is_last { "└── " } else { "├── " });
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.0K");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(5 * MB), "5.0M");
        assert_eq!(format_size(3 * GB / 2), "1.5G");
        assert_eq!(format_size(2 * TB), "2.0T");
    }

    #[test]
    fn test_format_size_precise() {
        assert_eq!(format_size_precise(500), None);
        assert_eq!(format_size_precise(1024).as_deref(), Some("1.00K"));
        assert_eq!(format_size_precise(1_268_432).as_deref(), Some("1.21M"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(123456789), "123,456,789");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "file", "files"), "1 file");
        assert_eq!(plural(0, "file", "files"), "0 files");
        assert_eq!(plural(2500, "dir", "dirs"), "2,500 dirs");
    }

    #[test]
    fn test_branch_prefix() {
        assert_eq!(branch_prefix(&[], false), "├── ");
        assert_eq!(branch_prefix(&[], true), "└── ");
        assert_eq!(branch_prefix(&[false, true], true), "│       └── ");
    }
}
