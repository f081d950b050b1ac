//! Submission form validation and normalization.

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::domains::resources::actions::SubmissionError;
use crate::domains::resources::data::SubmitResourceInput;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9\s\-().]{7,20}$").unwrap();
}

/// Form fields in display order, with their input names
fn required_fields(input: &SubmitResourceInput) -> [(&'static str, &str); 8] {
    [
        ("orgName", input.org_name.as_str()),
        ("url", input.url.as_str()),
        ("location", input.location.as_str()),
        ("email", input.email.as_str()),
        ("phone", input.phone.as_str()),
        ("categoryTags", input.category_tags.as_str()),
        ("extraTags", input.extra_tags.as_str()),
        ("description", input.description.as_str()),
    ]
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

/// Check presence of every field, then email, then phone.
///
/// All missing fields are reported together.
pub fn validate_submission(input: &SubmitResourceInput) -> Result<(), SubmissionError> {
    let missing: Vec<String> = required_fields(input)
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SubmissionError::MissingFields(missing));
    }

    if !is_valid_email(&input.email) {
        return Err(SubmissionError::InvalidEmail);
    }
    if !is_valid_phone(&input.phone) {
        return Err(SubmissionError::InvalidPhone);
    }

    Ok(())
}

/// Reduce to `+<digits>`. Ten-digit numbers are taken as North American
/// and get a leading `1`.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("+1{}", digits)
    } else {
        format!("+{}", digits)
    }
}

/// Split the location field on newlines and semicolons, dropping blanks and
/// repeats.
pub fn split_locations(raw: &str) -> Vec<String> {
    let mut locations: Vec<String> = Vec::new();
    for part in raw.split(['\n', ';']).map(str::trim) {
        if !part.is_empty() && !locations.iter().any(|l| l == part) {
            locations.push(part.to_string());
        }
    }
    locations
}

/// Add `https://` when the URL has no scheme. Input that still doesn't parse
/// is kept as typed.
pub fn normalize_website_url(raw: &str) -> String {
    let raw = raw.trim();
    if Url::parse(raw).is_ok_and(|u| u.has_host()) {
        return raw.to_string();
    }

    let with_scheme = format!("https://{}", raw);
    match Url::parse(&with_scheme) {
        Ok(url) if url.has_host() => with_scheme,
        _ => raw.to_string(),
    }
}
