//! Field masking by data type
//!
//! All spans are counted in Unicode scalar values. When a value is shorter
//! than the visible span the mask count clamps to zero; characters are never
//! duplicated to fill both ends of a short value.

use crate::anonymization::models::{DataType, MaskingPolicy};
use crate::domain::{AegisError, Result};

/// Visible suffix of a phone number
const PHONE_VISIBLE_SUFFIX: usize = 4;

/// Visible head and tail of a DNI
const DNI_VISIBLE_EDGE: usize = 2;

/// Mask `raw` according to `policy`
///
/// # Errors
///
/// [`AegisError::InvalidFormat`] if an email has no `@`, or a name is blank.
///
/// # Examples
///
/// ```
/// use aegis::anonymization::masking::mask_by_data_type;
/// use aegis::anonymization::models::{DataType, MaskingPolicy};
///
/// let policy = MaskingPolicy::new(DataType::Email);
/// assert_eq!(mask_by_data_type("maria@example.com", &policy).unwrap(), "ma***@example.com");
///
/// let policy = MaskingPolicy::new(DataType::Name);
/// assert_eq!(mask_by_data_type("Maria Lopez", &policy).unwrap(), "M.");
/// ```
pub fn mask_by_data_type(raw: &str, policy: &MaskingPolicy) -> Result<String> {
    match policy.data_type {
        DataType::Email => mask_email(raw, policy.visible_prefix, policy.mask_char),
        DataType::Phone => Ok(mask_phone(raw, policy.mask_char)),
        DataType::Dni => Ok(mask_dni(raw, policy.mask_char)),
        DataType::Name => mask_name(raw),
    }
}

fn mask_email(raw: &str, visible_prefix: usize, mask_char: char) -> Result<String> {
    let (local, domain) = raw
        .split_once('@')
        .ok_or_else(|| AegisError::InvalidFormat("email address has no '@'".to_string()))?;

    let local_len = local.chars().count();
    let visible = visible_prefix.min(local_len);

    let mut masked: String = local.chars().take(visible).collect();
    masked.extend(std::iter::repeat(mask_char).take(local_len - visible));
    masked.push('@');
    masked.push_str(domain);
    Ok(masked)
}

fn mask_phone(raw: &str, mask_char: char) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let hidden = chars.len().saturating_sub(PHONE_VISIBLE_SUFFIX);

    std::iter::repeat(mask_char)
        .take(hidden)
        .chain(chars[hidden..].iter().copied())
        .collect()
}

fn mask_dni(raw: &str, mask_char: char) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let head = DNI_VISIBLE_EDGE.min(chars.len());
    let tail = DNI_VISIBLE_EDGE.min(chars.len() - head);
    let hidden = chars.len() - head - tail;

    chars[..head]
        .iter()
        .copied()
        .chain(std::iter::repeat(mask_char).take(hidden))
        .chain(chars[head + hidden..].iter().copied())
        .collect()
}

fn mask_name(raw: &str) -> Result<String> {
    let initial = raw
        .trim()
        .chars()
        .next()
        .ok_or_else(|| AegisError::InvalidFormat("name is empty".to_string()))?;
    Ok(format!("{initial}."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(data_type: DataType) -> MaskingPolicy {
        MaskingPolicy::new(data_type)
    }

    #[test]
    fn test_email_keeps_domain() {
        let masked = mask_by_data_type("ab cd@x.com", &policy(DataType::Email)).unwrap();
        assert_eq!(masked, "ab***@x.com");
    }

    #[test]
    fn test_email_without_at_is_invalid() {
        let err = mask_by_data_type("not-an-email", &policy(DataType::Email)).unwrap_err();
        assert!(matches!(err, AegisError::InvalidFormat(_)));
    }

    #[test]
    fn test_email_domain_after_first_at() {
        let masked = mask_by_data_type("joe@a@b.com", &policy(DataType::Email)).unwrap();
        assert_eq!(masked, "jo*@a@b.com");
    }

    #[test]
    fn test_custom_mask_char_and_prefix() {
        let policy = policy(DataType::Email)
            .with_mask_char('#')
            .with_visible_prefix(0);
        assert_eq!(mask_by_data_type("abc@x.io", &policy).unwrap(), "###@x.io");
    }

    #[test]
    fn test_phone() {
        assert_eq!(mask_phone("600123456", '*'), "*****3456");
        assert_eq!(mask_phone("123", '*'), "123");
    }

    #[test]
    fn test_dni() {
        assert_eq!(mask_dni("12345678Z", '*'), "12*****8Z");
        assert_eq!(mask_dni("abc", '*'), "abc");
        assert_eq!(mask_dni("", '*'), "");
    }

    #[test]
    fn test_name() {
        assert_eq!(mask_name("  Álvaro Pérez").unwrap(), "Á.");
        assert!(matches!(mask_name("   "), Err(AegisError::InvalidFormat(_))));
    }
}
