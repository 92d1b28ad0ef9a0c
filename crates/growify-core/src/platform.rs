//! Supported social platforms.

use serde::{Deserialize, Serialize};

/// A connected social media platform.
///
/// Serialized lowercase everywhere (store keys, wire payloads, CLI args).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    YouTube,
    Twitter,
    LinkedIn,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::YouTube,
        Platform::Twitter,
        Platform::LinkedIn,
    ];

    /// Lowercase wire name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::YouTube => "youtube",
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
        }
    }

    /// Title-cased display name for user-facing text.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::YouTube => "YouTube",
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
        }
    }

    /// Brand accent color used by the presentation layer.
    #[must_use]
    pub fn brand_color(self) -> &'static str {
        match self {
            Platform::Instagram => "#E1306C",
            Platform::Facebook => "#4267B2",
            Platform::YouTube => "#FF0000",
            Platform::Twitter => "#1DA1F2",
            Platform::LinkedIn => "#0077B5",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            "youtube" => Ok(Platform::YouTube),
            "twitter" => Ok(Platform::Twitter),
            "linkedin" => Ok(Platform::LinkedIn),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_is_lowercase() {
        let json = serde_json::to_string(&Platform::YouTube).unwrap();
        assert_eq!(json, "\"youtube\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::YouTube);
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("tiktok".parse::<Platform>().is_err());
    }

    #[test]
    fn every_platform_has_display_name_and_color() {
        for p in Platform::ALL {
            assert!(!p.display_name().is_empty());
            assert!(p.brand_color().starts_with('#'));
        }
    }
}
