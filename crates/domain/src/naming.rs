//! Display names for category keys

/// Turn a camelCase key into a display name: `"allOutAttack"` -> `"All Out Attack"`.
///
/// A space goes before every ASCII uppercase letter, the first character is
/// uppercased and the result is trimmed.
pub fn format_category_name(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 8);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_case() {
        assert_eq!(format_category_name("allOutAttack"), "All Out Attack");
        assert_eq!(format_category_name("maneuvers"), "Maneuvers");
    }

    #[test]
    fn leading_capital_is_trimmed() {
        assert_eq!(format_category_name("Melee"), "Melee");
        assert_eq!(format_category_name("RangedAttacks"), "Ranged Attacks");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(format_category_name(""), "");
    }
}
