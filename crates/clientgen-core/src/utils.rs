//! Naming helpers shared by the prompt flow, the codegen invoker and project wiring.

use once_cell::sync::Lazy;
use regex::Regex;

static CLIENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("client name pattern is valid"));

/// Check a client name typed at the prompt.
///
/// Returns the message shown to the user when the name is rejected.
pub fn validate_client_name(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("Your API client name cannot be empty".to_string());
    }
    if !CLIENT_NAME.is_match(input) {
        return Err(
            "Your API client name cannot contain special characters or a blank space".to_string(),
        );
    }
    Ok(())
}

/// Client name derived from a name published by a gateway.
///
/// Gateways publish names such as `foo (foo)`: the first word is kept and
/// any character a client name cannot hold becomes `_`.
pub fn client_name_from(published: &str) -> Option<String> {
    let first = published.split_whitespace().next()?;
    let name: String = first
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let name = name.trim_matches('_');
    validate_client_name(name).ok()?;
    Some(name.to_string())
}

/// Lower snake case used for Java package segments and output folders.
///
/// A run of capitals after a lowercase letter or digit starts a new word but
/// stays together, so `getHTTPResponse` becomes `get_httpresponse`.
pub fn underscored(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower_or_digit = false;
    let mut in_upper_run = false;

    for ch in s.trim().chars() {
        if ch.is_uppercase() {
            if prev_lower_or_digit && !in_upper_run {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            in_upper_run = true;
            prev_lower_or_digit = false;
        } else if ch.is_alphanumeric() {
            out.push(ch);
            in_upper_run = false;
            prev_lower_or_digit = true;
        } else if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            in_upper_run = false;
            prev_lower_or_digit = false;
        }
    }

    out.trim_matches('_').to_string()
}

/// UpperCamelCase, built from the [`underscored`] words.
pub fn upper_camel(s: &str) -> String {
    underscored(s)
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Words of an identifier the way JHipster splits `baseName`.
///
/// Breaks on separators, on a lowercase to uppercase step, between letters
/// and digits, and inside a capital run before its last capital when a
/// lowercase letter follows (`HRService` is `HR` + `Service`).
pub fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && ch.is_uppercase())
                || (prev.is_alphabetic() && ch.is_numeric())
                || (prev.is_numeric() && ch.is_alphabetic())
                || (prev.is_uppercase()
                    && ch.is_uppercase()
                    && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `UpperFirst(camelCase(s))`: every word capitalized, the rest lowercased.
pub fn pascal_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// lowerCamelCase, used for Maven artifact ids.
pub fn lower_camel(s: &str) -> String {
    let upper = upper_camel(s);
    let mut chars = upper.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
