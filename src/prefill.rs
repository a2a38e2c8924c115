//! Builds initial query text from an externally supplied prefill string,
//! e.g. a CVE id or package name clicked elsewhere in the dashboard.

/// CVE ids become an exact `data.cve` lookup (uppercased); anything else
/// becomes a wildcard `data.package_name` match. Empty input yields an empty
/// query.
///
/// ```
/// use search_dsl::build_prefill_text;
/// assert_eq!(
///     build_prefill_text("cve-2021-44228"),
///     "type:finding/vulnerability data.cve:CVE-2021-44228"
/// );
/// assert_eq!(
///     build_prefill_text("openssl"),
///     "type:finding/vulnerability data.package_name:*openssl*"
/// );
/// assert_eq!(build_prefill_text("  "), "");
/// ```
pub fn build_prefill_text(prefill: &str) -> String {
    let s = prefill.trim();
    if s.is_empty() {
        return String::new();
    }
    if is_cve_id(s) {
        format!(
            "type:finding/vulnerability data.cve:{}",
            s.to_ascii_uppercase()
        )
    } else {
        format!("type:finding/vulnerability data.package_name:*{s}*")
    }
}

// `CVE-<4 digits>-<4 or more digits>`, case-insensitive.
fn is_cve_id(s: &str) -> bool {
    let Some(rest) = strip_prefix_ignore_case(s, "CVE-") else {
        return false;
    };
    let Some((year, seq)) = rest.split_once('-') else {
        return false;
    };
    year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && seq.len() >= 4
        && seq.chars().all(|c| c.is_ascii_digit())
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cve_detection() {
        assert!(is_cve_id("CVE-2021-44228"));
        assert!(is_cve_id("cve-2021-44228"));
        assert!(is_cve_id("CVE-2024-123456"));
        assert!(!is_cve_id("CVE-2021-1"));
        assert!(!is_cve_id("CVE-21-44228"));
        assert!(!is_cve_id("CVE-2021-44a28"));
        assert!(!is_cve_id("openssl"));
        assert!(!is_cve_id("CVE-"));
    }

    #[test]
    fn cve_prefill_uppercases_the_id() {
        assert_eq!(
            build_prefill_text(" cve-2021-44228 "),
            "type:finding/vulnerability data.cve:CVE-2021-44228"
        );
    }

    #[test]
    fn other_prefill_becomes_wildcard_package_match() {
        assert_eq!(
            build_prefill_text("log4j"),
            "type:finding/vulnerability data.package_name:*log4j*"
        );
    }
}
