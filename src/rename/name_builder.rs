/// Characters that cannot appear in a folder name on common filesystems.
const RESERVED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strip filesystem-reserved characters from a name segment.
///
/// Characters are deleted outright, not substituted, so
/// `"Mission: Impossible"` becomes `"Mission Impossible"`.
pub fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| !RESERVED_CHARS.contains(c))
        .collect()
}

/// Extract a display year from a catalog date field.
///
/// Only the first four characters of a date-like string are used; an absent
/// or too-short date yields the literal token `Unknown`.
pub fn display_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if date.chars().count() >= 4 => date.chars().take(4).collect(),
        _ => "Unknown".to_string(),
    }
}

/// Build the sanitized folder name `TITLE (YEAR) [id-EXTERNALID]`.
pub fn build_folder_name(title: &str, year: &str, external_id: u64) -> String {
    sanitize_segment(&format!("{} ({}) [id-{}]", title, year, external_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_all_reserved_chars() {
        let input = "a<b>c:d\"e/f\\g|h?i*j";
        assert_eq!(sanitize_segment(input), "abcdefghij");
    }

    #[test]
    fn test_sanitize_deletes_without_substitution() {
        assert_eq!(sanitize_segment("Mission: Impossible"), "Mission Impossible");
        assert!(!sanitize_segment("What/If").contains('_'));
    }

    #[test]
    fn test_sanitize_leaves_clean_names_untouched() {
        assert_eq!(sanitize_segment("Breaking Bad (2008)"), "Breaking Bad (2008)");
    }

    #[test]
    fn test_sanitize_preserves_unicode() {
        assert_eq!(sanitize_segment("Amélie?"), "Amélie");
    }

    #[test]
    fn test_display_year_from_full_date() {
        assert_eq!(display_year(Some("2008-01-20")), "2008");
    }

    #[test]
    fn test_display_year_from_bare_year() {
        assert_eq!(display_year(Some("1996")), "1996");
    }

    #[test]
    fn test_display_year_absent() {
        assert_eq!(display_year(None), "Unknown");
    }

    #[test]
    fn test_display_year_too_short() {
        assert_eq!(display_year(Some("96")), "Unknown");
    }

    #[test]
    fn test_build_folder_name() {
        assert_eq!(
            build_folder_name("Breaking Bad", "2008", 1396),
            "Breaking Bad (2008) [id-1396]"
        );
    }

    #[test]
    fn test_build_folder_name_sanitizes_title() {
        assert_eq!(
            build_folder_name("Mission: Impossible", "1996", 954),
            "Mission Impossible (1996) [id-954]"
        );
    }

    #[test]
    fn test_build_folder_name_unknown_year() {
        assert_eq!(
            build_folder_name("Obscure Film", "Unknown", 42),
            "Obscure Film (Unknown) [id-42]"
        );
    }
}
