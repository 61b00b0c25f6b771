//! License terms, compatibility and expiry.
//!
//! Pure table lookups. A derivative profile may be as restrictive as its
//! source but never more permissive on the share-alike, commercial-use or
//! modification axes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum LicenseType {
    #[serde(rename = "CC0-1.0")]
    #[strum(serialize = "CC0-1.0")]
    Cc0,
    #[default]
    #[serde(rename = "CC-BY-4.0")]
    #[strum(serialize = "CC-BY-4.0")]
    CcBy,
    #[serde(rename = "CC-BY-SA-4.0")]
    #[strum(serialize = "CC-BY-SA-4.0")]
    CcBySa,
    #[serde(rename = "CC-BY-NC-4.0")]
    #[strum(serialize = "CC-BY-NC-4.0")]
    CcByNc,
    #[serde(rename = "CC-BY-NC-SA-4.0")]
    #[strum(serialize = "CC-BY-NC-SA-4.0")]
    CcByNcSa,
    #[serde(rename = "CC-BY-ND-4.0")]
    #[strum(serialize = "CC-BY-ND-4.0")]
    CcByNd,
    #[serde(rename = "CC-BY-NC-ND-4.0")]
    #[strum(serialize = "CC-BY-NC-ND-4.0")]
    CcByNcNd,
    #[serde(rename = "MIT")]
    #[strum(serialize = "MIT")]
    Mit,
    #[serde(rename = "Proprietary")]
    #[strum(serialize = "Proprietary")]
    Proprietary,
}

/// What a license permits and requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseTerms {
    pub can_use: bool,
    pub can_modify: bool,
    pub can_distribute: bool,
    pub commercial_use: bool,
    pub requires_attribution: bool,
    pub share_alike: bool,
}

impl LicenseTerms {
    const fn new(
        can_modify: bool,
        can_distribute: bool,
        commercial_use: bool,
        requires_attribution: bool,
        share_alike: bool,
    ) -> Self {
        Self {
            can_use: true,
            can_modify,
            can_distribute,
            commercial_use,
            requires_attribution,
            share_alike,
        }
    }
}

/// Returns the fixed permission terms of a license.
pub fn license_terms(license: LicenseType) -> LicenseTerms {
    //                                     modify distribute commercial attribution share_alike
    match license {
        LicenseType::Cc0 => LicenseTerms::new(true, true, true, false, false),
        LicenseType::CcBy => LicenseTerms::new(true, true, true, true, false),
        LicenseType::CcBySa => LicenseTerms::new(true, true, true, true, true),
        LicenseType::CcByNc => LicenseTerms::new(true, true, false, true, false),
        LicenseType::CcByNcSa => LicenseTerms::new(true, true, false, true, true),
        LicenseType::CcByNd => LicenseTerms::new(false, true, true, true, false),
        LicenseType::CcByNcNd => LicenseTerms::new(false, true, false, true, false),
        LicenseType::Mit => LicenseTerms::new(true, true, true, true, false),
        LicenseType::Proprietary => LicenseTerms::new(false, false, true, false, false),
    }
}

/// License attached to a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub license_type: LicenseType,
    /// Always derived from `license_type`; stored for consumers that read the JSON directly
    pub terms: LicenseTerms,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
}

impl LicenseInfo {
    pub fn new(license_type: LicenseType) -> Self {
        Self {
            license_type,
            terms: license_terms(license_type),
            attribution: None,
            expires_at: None,
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: NaiveDate) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn expiry_status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        self.expires_at.map(|date| check_expiry(date, today))
    }
}

/// Result of checking whether a derivative may use a given license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    pub compatible: bool,
    /// Human-readable violations, empty when compatible
    pub restrictions: Vec<String>,
}

/// Checks whether a role licensed under `source` may be republished as a
/// derivative under `derivative`.
pub fn check_compatibility(source: LicenseType, derivative: LicenseType) -> Compatibility {
    let src = license_terms(source);
    let dst = license_terms(derivative);
    let mut restrictions = Vec::new();

    if !src.can_modify {
        restrictions.push(format!(
            "NoDerivatives: {} does not permit modified versions",
            source
        ));
    }

    if src.share_alike && derivative != source {
        restrictions.push(format!(
            "ShareAlike: derivatives of {} must use {} (got {})",
            source, source, derivative
        ));
    }

    if !src.commercial_use && dst.commercial_use {
        restrictions.push(format!(
            "NonCommercial: {} forbids commercial use but {} allows it",
            source, derivative
        ));
    }

    Compatibility {
        compatible: restrictions.is_empty(),
        restrictions,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryStatus {
    pub expired: bool,
    /// Negative once expired
    pub days_remaining: i64,
}

/// Classifies a license expiry date relative to `today`.
///
/// A license expiring today is still valid with zero days remaining.
pub fn check_expiry(expires_at: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    let days_remaining = (expires_at - today).num_days();
    ExpiryStatus {
        expired: days_remaining < 0,
        days_remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_share_alike_source_rejects_plain_by() {
        let result = check_compatibility(LicenseType::CcBySa, LicenseType::CcBy);
        assert!(!result.compatible);
        assert_eq!(result.restrictions.len(), 1);
        assert!(result.restrictions[0].starts_with("ShareAlike"));
    }

    #[test]
    fn test_by_source_accepts_share_alike_derivative() {
        let result = check_compatibility(LicenseType::CcBy, LicenseType::CcBySa);
        assert!(result.compatible);
        assert!(result.restrictions.is_empty());
    }

    #[test]
    fn test_non_commercial_source_rejects_commercial_derivative() {
        let result = check_compatibility(LicenseType::CcByNc, LicenseType::Mit);
        assert!(!result.compatible);
        assert!(result.restrictions[0].starts_with("NonCommercial"));

        assert!(check_compatibility(LicenseType::CcByNc, LicenseType::CcByNcSa).compatible);
    }

    #[test]
    fn test_no_derivatives_source_is_never_compatible() {
        let result = check_compatibility(LicenseType::CcByNd, LicenseType::CcByNd);
        assert!(!result.compatible);
        assert!(result.restrictions[0].starts_with("NoDerivatives"));
    }

    #[test]
    fn test_license_type_text_form() {
        assert_eq!(LicenseType::CcByNcSa.to_string(), "CC-BY-NC-SA-4.0");
        assert_eq!(LicenseType::from_str("CC0-1.0").unwrap(), LicenseType::Cc0);
        let json = serde_json::to_string(&LicenseType::Mit).unwrap();
        assert_eq!(json, "\"MIT\"");
    }

    #[test]
    fn test_license_info_carries_table_terms() {
        let info = LicenseInfo::new(LicenseType::CcByNc);
        assert!(!info.terms.commercial_use);
        assert!(info.terms.requires_attribution);
    }

    #[test]
    fn test_expiry_classification() {
        let today = date(2026, 3, 1);
        assert_eq!(
            check_expiry(date(2026, 3, 11), today),
            ExpiryStatus { expired: false, days_remaining: 10 }
        );
        assert_eq!(
            check_expiry(today, today),
            ExpiryStatus { expired: false, days_remaining: 0 }
        );
        assert!(check_expiry(date(2026, 2, 28), today).expired);

        let info = LicenseInfo::new(LicenseType::Mit);
        assert!(info.expiry_status(today).is_none());
    }
}
