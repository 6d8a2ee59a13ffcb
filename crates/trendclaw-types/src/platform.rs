use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed enumeration that can be parsed from its lowercase wire name
pub trait ClosedSet: FromStr + Sized {
    /// Every accepted wire name, in declaration order
    const VARIANTS: &'static [&'static str];
}

/// Social platform a caption or post targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Tiktok,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
        }
    }
}

impl ClosedSet for Platform {
    const VARIANTS: &'static [&'static str] = &["twitter", "instagram", "tiktok"];
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Self::Twitter),
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::Tiktok),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_platforms() {
        for name in Platform::VARIANTS {
            let platform: Platform = name.parse().unwrap();
            assert_eq!(platform.as_str(), *name);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Twitter".parse::<Platform>().is_err());
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Platform::Tiktok).unwrap();
        assert_eq!(json, "\"tiktok\"");
    }
}
