//! Class and property naming
//!
//! Schema names are camelCase (`startDate`) or already PascalCase
//! (`SessionSeries`); generated members are PascalCase.

/// Convert a schema name to a PascalCase identifier.
///
/// Word separators (`_`, `-`, space) are dropped and the following letter
/// upper-cased. Existing inner capitals are preserved, so `startDate`
/// becomes `StartDate` and `URL` stays `URL`.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("startDate"), "StartDate");
        assert_eq!(to_pascal_case("SessionSeries"), "SessionSeries");
        assert_eq!(to_pascal_case("URL"), "URL");
        assert_eq!(to_pascal_case("tenant_id"), "TenantId");
        assert_eq!(to_pascal_case("user-profile"), "UserProfile");
        assert_eq!(to_pascal_case(""), "");
    }
}
