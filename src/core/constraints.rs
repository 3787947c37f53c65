use serde::Serialize;
use super::value::Value;

/// Declarative per-field constraint checked by the validation pass
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Constraint {
    NotBlank,
    MaxLength { max: usize },
    Range { min: f64, max: f64 },
    Email,
    /// Digits plus phone/document separators (`-`, `.`, `/`, `+`, parentheses, spaces)
    Digits,
}

impl Constraint {
    /// Check a value, returning the violation message if it fails.
    /// Null always passes; presence is checked separately.
    #[must_use]
    pub fn check(&self, value: &Value) -> Option<String> {
        if value.is_null() {
            return None;
        }
        match self {
            Self::NotBlank => {
                let blank = value.as_text().is_some_and(|s| s.trim().is_empty());
                blank.then(|| "must not be blank".to_string())
            }
            Self::MaxLength { max } => {
                let len = value.to_text().chars().count();
                (len > *max).then(|| format!("must be at most {max} characters (got {len})"))
            }
            Self::Range { min, max } => match value.as_number() {
                Some(n) if n < *min || n > *max => {
                    Some(format!("must be between {min} and {max} (got {n})"))
                }
                Some(_) => None,
                None => Some("must be numeric".to_string()),
            },
            Self::Email => {
                let text = value.to_text();
                (!looks_like_email(&text)).then(|| format!("'{text}' is not a valid email address"))
            }
            Self::Digits => {
                let text = value.to_text();
                let ok = text.chars().any(|c| c.is_ascii_digit())
                    && text
                        .chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | '/' | ' ' | '+' | '(' | ')'));
                (!ok).then(|| format!("'{text}' must contain only digits and separators"))
            }
        }
    }
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !text.chars().any(char::is_whitespace)
}
