//! Supported languages for ASR

use serde::{Deserialize, Serialize};

/// Language information
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Language {
    /// Language code (e.g., "en", "de")
    pub code: &'static str,
    /// Display name
    pub name: &'static str,
    /// Whisper language code (may differ from code)
    pub whisper_code: &'static str,
}

/// Supported languages list
pub static SUPPORTED_LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        name: "English",
        whisper_code: "en",
    },
    Language {
        code: "es",
        name: "Spanish",
        whisper_code: "es",
    },
    Language {
        code: "fr",
        name: "French",
        whisper_code: "fr",
    },
    Language {
        code: "de",
        name: "German",
        whisper_code: "de",
    },
    Language {
        code: "it",
        name: "Italian",
        whisper_code: "it",
    },
    Language {
        code: "pt",
        name: "Portuguese",
        whisper_code: "pt",
    },
    Language {
        code: "nl",
        name: "Dutch",
        whisper_code: "nl",
    },
    Language {
        code: "ja",
        name: "Japanese",
        whisper_code: "ja",
    },
    Language {
        code: "ko",
        name: "Korean",
        whisper_code: "ko",
    },
    Language {
        code: "zh",
        name: "Chinese",
        whisper_code: "zh",
    },
    Language {
        code: "ru",
        name: "Russian",
        whisper_code: "ru",
    },
    Language {
        code: "ar",
        name: "Arabic",
        whisper_code: "ar",
    },
    Language {
        code: "hi",
        name: "Hindi",
        whisper_code: "hi",
    },
];

impl Language {
    /// Map a user-selected language code to Whisper's language code
    pub fn to_whisper_code(code: &str) -> &'static str {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.whisper_code)
            .unwrap_or("en")
    }

    /// Check if a language is supported
    pub fn is_supported(code: &str) -> bool {
        SUPPORTED_LANGUAGES.iter().any(|l| l.code == code)
    }

    /// Get language info by code
    pub fn get(code: &str) -> Option<&'static Language> {
        SUPPORTED_LANGUAGES.iter().find(|l| l.code == code)
    }
}
