//! UI label catalogs.
//!
//! Label translations are pure data, shipped as JSON resources and loaded
//! into a per-language map. The shell looks labels up by key; the English
//! catalog backs any key a translation misses.

use std::collections::HashMap;

use crate::domain::language::LanguageCode;

const EN: &str = include_str!("../../../locales/en.json");
const FA: &str = include_str!("../../../locales/fa.json");
const ZH_CN: &str = include_str!("../../../locales/zh-CN.json");
const RU: &str = include_str!("../../../locales/ru.json");

fn resource(language: LanguageCode) -> &'static str {
    match language {
        LanguageCode::English => EN,
        LanguageCode::Persian => FA,
        LanguageCode::ChineseSimplified => ZH_CN,
        LanguageCode::Russian => RU,
    }
}

/// Translated UI labels for one language.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    language: LanguageCode,
    labels: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl LabelCatalog {
    /// Load the catalog for `language` from the embedded resources.
    pub fn for_language(language: LanguageCode) -> Result<Self, serde_json::Error> {
        let labels = serde_json::from_str(resource(language))?;
        let fallback = serde_json::from_str(EN)?;
        Ok(Self {
            language,
            labels,
            fallback,
        })
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    /// Look a label up, falling back to English, then to the key itself.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}
