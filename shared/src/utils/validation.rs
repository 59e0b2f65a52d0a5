//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Optional "16" century prefix followed by the ten digit number.
/// The third digit is at least 2, which separates organizations from
/// personal identity numbers.
static ORGANIZATION_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(16)?([1-9]{2}[2-9][0-9]{7})$").expect("valid organization number regex")
});

/// Check that a string looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Reasons an organization number is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationNumberError {
    /// Wrong length or digit layout
    InvalidFormat,
    /// The control digit does not match
    InvalidChecksum,
}

impl std::fmt::Display for OrganizationNumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizationNumberError::InvalidFormat => write!(f, "invalid organization number format"),
            OrganizationNumberError::InvalidChecksum => write!(f, "invalid organization number checksum"),
        }
    }
}

impl std::error::Error for OrganizationNumberError {}

/// Validate an organization number: layout first, then the Luhn
/// control digit over the ten digit core.
pub fn validate_organization_number(organization_number: u64) -> Result<(), OrganizationNumberError> {
    let text = organization_number.to_string();
    let captures = ORGANIZATION_NUMBER_REGEX
        .captures(&text)
        .ok_or(OrganizationNumberError::InvalidFormat)?;
    let core = captures
        .get(2)
        .ok_or(OrganizationNumberError::InvalidFormat)?
        .as_str();

    if luhn_checksum_valid(core) {
        Ok(())
    } else {
        Err(OrganizationNumberError::InvalidChecksum)
    }
}

fn luhn_checksum_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(index, digit)| {
            if index % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}
