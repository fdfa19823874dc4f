//! Parameter naming derived from member names.
//!
//! Constructor parameters are named after the members they assign, converted
//! to the camel-cased form idiomatic for parameters: common field prefixes
//! (`_`, `m_`, `s_`) are stripped and the first letter is lowercased, so
//! `_name`, `m_name`, and `Name` all become `name`.

/// Derive a camel-cased parameter name from a member name.
///
/// Falls back to the original name (lowercased) when stripping would leave
/// nothing, so a field named `_` still gets a usable parameter name.
pub fn parameter_name(member_name: &str) -> String {
    let stripped = strip_field_prefix(member_name);
    let base = if stripped.is_empty() {
        member_name
    } else {
        stripped
    };

    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Make each derived name unique within the list by appending an ordinal to
/// later duplicates (`value`, `value1`, `value2`, ...). Parameter order is
/// preserved.
pub fn ensure_unique(names: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !result.contains(&name) {
            result.push(name);
            continue;
        }
        let mut ordinal = 1u32;
        loop {
            let candidate = format!("{name}{ordinal}");
            if !result.contains(&candidate) {
                result.push(candidate);
                break;
            }
            ordinal += 1;
        }
    }
    result
}

fn strip_field_prefix(name: &str) -> &str {
    for prefix in ["m_", "s_", "_"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            if !rest.is_empty() {
                return rest;
            }
        }
    }
    name
}
