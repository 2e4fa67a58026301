use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Display locale for dates, placeholders and statistic labels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese (default).
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub fn missing_description(&self) -> &'static str {
        match self {
            Locale::PtBr => "Sem descrição",
            Locale::EnUs => "No description",
        }
    }

    /// Short date in the locale's conventional order, computed in UTC so the
    /// same instant always renders the same text.
    pub fn format_date(&self, instant: &DateTime<Utc>) -> String {
        match self {
            Locale::PtBr => format!("{:02}/{:02}/{}", instant.day(), instant.month(), instant.year()),
            Locale::EnUs => format!("{}/{}/{}", instant.month(), instant.day(), instant.year()),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}
