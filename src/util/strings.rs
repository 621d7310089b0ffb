/// Split `value` into chunks of at most `limit` characters.
///
/// `limit == 0` returns the whole string as the only chunk; an empty
/// `value` with a positive limit yields no chunks.
pub fn split_by_limit(value: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return vec![value.to_string()];
    }

    let chars: Vec<char> = value.chars().collect();
    chars.chunks(limit).map(|chunk| chunk.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_remainder() {
        assert_eq!(split_by_limit("asdfagdsfg", 3), vec!["asd", "fag", "dsf", "g"]);
    }

    #[test]
    fn test_split_exactly() {
        assert_eq!(split_by_limit("asdfagdsfg", 2), vec!["as", "df", "ag", "ds", "fg"]);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(split_by_limit("asdfagdsfg", 0), vec!["asdfagdsfg"]);
    }

    #[test]
    fn test_limit_longer_than_value() {
        assert_eq!(split_by_limit("asdfagdsfg", 10), vec!["asdfagdsfg"]);
        assert_eq!(split_by_limit("asdfagdsfg", 100), vec!["asdfagdsfg"]);
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(split_by_limit("αβγδε", 2), vec!["αβ", "γδ", "ε"]);
    }

    #[test]
    fn test_empty_value() {
        assert!(split_by_limit("", 3).is_empty());
        assert_eq!(split_by_limit("", 0), vec![""]);
    }
}
