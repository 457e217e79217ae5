use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};

/// Languages the product exposes in its language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fa")]
    Persian,
    #[serde(rename = "zh-CN")]
    ChineseSimplified,
    #[serde(rename = "ru")]
    Russian,
}

/// Layout direction hint for text rendered in a given language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

impl LanguageCode {
    /// Every supported language, in picker order.
    pub const ALL: [LanguageCode; 4] = [
        LanguageCode::English,
        LanguageCode::Persian,
        LanguageCode::ChineseSimplified,
        LanguageCode::Russian,
    ];

    /// Get the language tag sent to the synthesis service.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Persian => "fa",
            LanguageCode::ChineseSimplified => "zh-CN",
            LanguageCode::Russian => "ru",
        }
    }

    /// Parse a language tag; `None` for unsupported tags.
    pub fn from_code(code: &str) -> Option<Self> {
        LanguageCode::ALL.into_iter().find(|lang| lang.as_str() == code)
    }

    /// The language's name in that language, for the picker.
    pub fn native_name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Persian => "فارسی",
            LanguageCode::ChineseSimplified => "中文",
            LanguageCode::Russian => "Русский",
        }
    }

    /// Direction the shell should lay text out in.
    ///
    /// Persian is the only right-to-left language here; Russian is
    /// left-to-right.
    pub fn text_direction(&self) -> TextDirection {
        match self {
            LanguageCode::Persian => TextDirection::RightToLeft,
            _ => TextDirection::LeftToRight,
        }
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::English => LanguageCode::English,
            Language::Persian => LanguageCode::Persian,
            Language::Chinese => LanguageCode::ChineseSimplified,
            Language::Russian => LanguageCode::Russian,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Regional pronunciation variant, selected through the synthesis host's
/// top-level domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccentVariant {
    #[serde(rename = "com")]
    UnitedStates,
    #[serde(rename = "co.uk")]
    UnitedKingdom,
    #[serde(rename = "ca")]
    Canada,
    #[serde(rename = "com.au")]
    Australia,
    #[serde(rename = "co.in")]
    India,
    #[serde(rename = "ie")]
    Ireland,
}

impl AccentVariant {
    /// Every accent variant, in picker order.
    pub const ALL: [AccentVariant; 6] = [
        AccentVariant::UnitedStates,
        AccentVariant::UnitedKingdom,
        AccentVariant::Canada,
        AccentVariant::Australia,
        AccentVariant::India,
        AccentVariant::Ireland,
    ];

    /// The top-level domain of the synthesis host serving this variant.
    pub fn as_tld(&self) -> &'static str {
        match self {
            AccentVariant::UnitedStates => "com",
            AccentVariant::UnitedKingdom => "co.uk",
            AccentVariant::Canada => "ca",
            AccentVariant::Australia => "com.au",
            AccentVariant::India => "co.in",
            AccentVariant::Ireland => "ie",
        }
    }

    /// Human-readable name for the picker.
    pub fn label(&self) -> &'static str {
        match self {
            AccentVariant::UnitedStates => "Default (US)",
            AccentVariant::UnitedKingdom => "United Kingdom",
            AccentVariant::Canada => "Canada",
            AccentVariant::Australia => "Australia",
            AccentVariant::India => "India",
            AccentVariant::Ireland => "Ireland",
        }
    }
}

impl Default for AccentVariant {
    fn default() -> Self {
        AccentVariant::UnitedStates
    }
}

impl std::fmt::Display for AccentVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tld())
    }
}

/// Build a detector over the supported languages. Construction is
/// expensive; the engine does it once and shares it.
pub fn language_detector() -> LanguageDetector {
    let languages = vec![
        Language::English,
        Language::Persian,
        Language::Chinese,
        Language::Russian,
    ];
    LanguageDetectorBuilder::from_languages(&languages).build()
}

/// Detect the language of `text`, falling back to English when the
/// detector cannot decide.
pub fn detect_language(detector: &LanguageDetector, text: &str) -> LanguageCode {
    match detector.detect_language_of(text) {
        Some(language) => LanguageCode::from_lingua(language),
        None => {
            tracing::warn!("Could not detect language, falling back to English");
            LanguageCode::English
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip() {
        for lang in LanguageCode::ALL {
            assert_eq!(LanguageCode::from_code(lang.as_str()), Some(lang));
        }
        assert_eq!(LanguageCode::from_code("xx"), None);
    }

    #[test]
    fn test_persian_is_the_only_rtl_language() {
        assert_eq!(
            LanguageCode::Persian.text_direction(),
            TextDirection::RightToLeft
        );
        assert_eq!(
            LanguageCode::English.text_direction(),
            TextDirection::LeftToRight
        );
        assert_eq!(
            LanguageCode::ChineseSimplified.text_direction(),
            TextDirection::LeftToRight
        );
        // Russian reads left to right; a previous release flagged it RTL
        // by mistake.
        assert_eq!(
            LanguageCode::Russian.text_direction(),
            TextDirection::LeftToRight
        );
    }

    #[test]
    fn test_accent_tlds() {
        assert_eq!(AccentVariant::UnitedStates.as_tld(), "com");
        assert_eq!(AccentVariant::UnitedKingdom.as_tld(), "co.uk");
        assert_eq!(AccentVariant::Australia.as_tld(), "com.au");
        assert_eq!(AccentVariant::default(), AccentVariant::UnitedStates);
    }

    #[test]
    fn test_detect_language_english() {
        let detector = language_detector();
        let text = "This is a test in English. The quick brown fox jumps over the lazy dog.";
        assert_eq!(detect_language(&detector, text), LanguageCode::English);
    }

    #[test]
    fn test_detect_language_russian() {
        let detector = language_detector();
        let text = "Это проверка на русском языке. Быстрая коричневая лиса прыгает через ленивую собаку.";
        assert_eq!(detect_language(&detector, text), LanguageCode::Russian);
    }

    #[test]
    fn test_detect_language_persian() {
        let detector = language_detector();
        let text = "این یک آزمایش به زبان فارسی است. روباه قهوه‌ای سریع از روی سگ تنبل می‌پرد.";
        assert_eq!(detect_language(&detector, text), LanguageCode::Persian);
    }

    #[test]
    fn test_detect_language_chinese() {
        let detector = language_detector();
        let text = "这是一个中文测试。敏捷的棕色狐狸跳过了懒惰的狗。";
        assert_eq!(
            detect_language(&detector, text),
            LanguageCode::ChineseSimplified
        );
    }

    #[test]
    fn test_serde_uses_language_tags() {
        let json = serde_json::to_string(&LanguageCode::ChineseSimplified).unwrap();
        assert_eq!(json, "\"zh-CN\"");
        let accent: AccentVariant = serde_json::from_str("\"co.uk\"").unwrap();
        assert_eq!(accent, AccentVariant::UnitedKingdom);
    }
}
