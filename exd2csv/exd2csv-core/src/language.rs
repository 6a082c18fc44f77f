use std::{fmt, str::FromStr};

/// Client languages a sheet can be localized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Language-agnostic data (`""`)
    None,
    /// Japanese (`ja`)
    Japanese,
    /// English (`en`)
    English,
    /// German (`de`)
    German,
    /// French (`fr`)
    French,
    /// Simplified Chinese (`chs`)
    ChineseSimplified,
    /// Traditional Chinese (`cht`)
    ChineseTraditional,
    /// Korean (`ko`)
    Korean,
}

/// Language used when a sheet declares neither `None` nor the requested language.
pub const DEFAULT_FALLBACK_LANGUAGE: Language = Language::English;

impl Language {
    pub const ALL: [Language; 8] = [
        Language::None,
        Language::Japanese,
        Language::English,
        Language::German,
        Language::French,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
        Language::Korean,
    ];

    /// Map a header language id to a language.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    pub fn id(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Japanese => 1,
            Self::English => 2,
            Self::German => 3,
            Self::French => 4,
            Self::ChineseSimplified => 5,
            Self::ChineseTraditional => 6,
            Self::Korean => 7,
        }
    }

    /// Suffix used in data page file keys.
    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Japanese => "ja",
            Self::English => "en",
            Self::German => "de",
            Self::French => "fr",
            Self::ChineseSimplified => "chs",
            Self::ChineseTraditional => "cht",
            Self::Korean => "ko",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}'")]
pub struct ParseLanguageError(pub String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    /// Accepts page codes and the regional client keys (`cn`, `tc`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "ja" => Ok(Self::Japanese),
            "en" => Ok(Self::English),
            "de" => Ok(Self::German),
            "fr" => Ok(Self::French),
            "chs" | "cn" => Ok(Self::ChineseSimplified),
            "cht" | "tc" => Ok(Self::ChineseTraditional),
            "ko" => Ok(Self::Korean),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}
