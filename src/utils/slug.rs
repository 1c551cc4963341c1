/// Fallback slug for names with no usable characters.
pub const DEFAULT_SLUG: &str = "user";

/// Lowercases `input` and collapses every run of characters outside
/// `[a-z0-9_-]` into a single `-`, trimming `-` from both ends.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut in_gap = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-' {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(slugify("Jöhn Snow!!"), "j-hn-snow");
        assert_eq!(slugify("  Ada  Lovelace  "), "ada-lovelace");
    }

    #[test]
    fn keeps_underscores_and_hyphens() {
        assert_eq!(slugify("big_Bird-42"), "big_bird-42");
    }

    #[test]
    fn empty_falls_back_to_user() {
        assert_eq!(slugify(""), "user");
        assert_eq!(slugify("!!!"), "user");
        assert_eq!(slugify("日本"), "user");
    }
}
