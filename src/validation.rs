//! Field-level validation for brand drafts.
//!
//! Every rule is evaluated independently so callers get the full list of
//! violations in one response. The website and mobile patterns use explicit
//! ASCII classes: `\d`, `\w` and `\s` would otherwise match Unicode.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::BrandDraft;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 255;
pub const URL_MAX_CHARS: usize = 500;

static WEBSITE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})[/A-Za-z0-9_ .-]*/?$")
        .expect("website pattern compiles")
});

static MOBILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[0-9 \t\n\x0B\f\r\-()]{10,20}$").expect("mobile pattern compiles")
});

/// A single failed constraint, keyed by the wire name of the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Field name as it appears in request bodies (e.g. `websiteLink`)
    #[schema(example = "websiteLink")]
    pub field: String,
    /// Human-readable reason
    #[schema(example = "Invalid website URL format")]
    pub reason: String,
}

impl FieldViolation {
    fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A draft that passed [`validate`]. Only obtainable through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBrand {
    name: String,
    logo_url: Option<String>,
    website_link: Option<String>,
    certificate_urls: Option<String>,
    mobile_number: Option<String>,
    address: Option<String>,
}

impl ValidatedBrand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    pub fn website_link(&self) -> Option<&str> {
        self.website_link.as_deref()
    }

    pub fn certificate_urls(&self) -> Option<&str> {
        self.certificate_urls.as_deref()
    }

    pub fn mobile_number(&self) -> Option<&str> {
        self.mobile_number.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Collects every constraint the draft violates, in field order.
pub fn violations(draft: &BrandDraft) -> Vec<FieldViolation> {
    let mut found = Vec::new();

    match draft.name.as_deref() {
        None => found.push(FieldViolation::new("name", "Brand name is required")),
        Some(name) if name.trim().is_empty() => {
            found.push(FieldViolation::new("name", "Brand name is required"))
        }
        Some(name) => {
            // Counts Unicode scalar values, not UTF-16 code units: a name of
            // one astral-plane character is too short here.
            let len = name.chars().count();
            if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
                found.push(FieldViolation::new(
                    "name",
                    "Brand name must be between 2 and 255 characters",
                ));
            }
        }
    }

    if let Some(logo) = draft.logo_url.as_deref()
        && logo.chars().count() > URL_MAX_CHARS
    {
        found.push(FieldViolation::new(
            "logoUrl",
            "Logo URL must not exceed 500 characters",
        ));
    }

    if let Some(website) = draft.website_link.as_deref() {
        if website.chars().count() > URL_MAX_CHARS {
            found.push(FieldViolation::new(
                "websiteLink",
                "Website link must not exceed 500 characters",
            ));
        }
        if !is_valid_website(website) {
            found.push(FieldViolation::new(
                "websiteLink",
                "Invalid website URL format",
            ));
        }
    }

    if let Some(mobile) = draft.mobile_number.as_deref()
        && !is_valid_mobile_number(mobile)
    {
        found.push(FieldViolation::new(
            "mobileNumber",
            "Invalid mobile number format",
        ));
    }

    found
}

/// Validates a draft, returning the typed brand or all of its violations.
pub fn validate(draft: BrandDraft) -> Result<ValidatedBrand, Vec<FieldViolation>> {
    let found = violations(&draft);
    if !found.is_empty() {
        return Err(found);
    }

    let BrandDraft {
        name,
        logo_url,
        website_link,
        certificate_urls,
        mobile_number,
        address,
    } = draft;

    // `violations` reports a missing name, so this branch is unreachable in practice.
    let Some(name) = name else {
        return Err(vec![FieldViolation::new("name", "Brand name is required")]);
    };

    Ok(ValidatedBrand {
        name,
        logo_url,
        website_link,
        certificate_urls,
        mobile_number,
        address,
    })
}

/// Optional http(s) scheme, a lowercase dotted host with a 2-6 letter
/// top-level label, and an optional path.
pub fn is_valid_website(value: &str) -> bool {
    WEBSITE_PATTERN.is_match(value)
}

/// Optional leading `+`, then 10-20 digits, spaces, hyphens or parentheses.
pub fn is_valid_mobile_number(value: &str) -> bool {
    MOBILE_PATTERN.is_match(value)
}
