//! Feedback configuration.

use std::env;
use std::time::Duration;

pub const START_TEXT: &str = "Ready? Stack them like sweet treats!";
pub const START_TEXT_ZH: &str = "准备好了吗？像堆甜点一样堆起来吧！🍬";
pub const RESET_TEXT: &str = "Rebuilding the tower!";
pub const FALLBACK_TEXT: &str = "Laki is resting for a moment...";

/// How long the pet stays happy after a line clear
pub const HAPPY_MS: u64 = 2000;

/// Language of the canned lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Parse a language tag such as `en`, `zh` or `zh-CN`
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        match tag.split(['-', '_']).next() {
            Some("en") => Some(Language::En),
            Some("zh") => Some(Language::Zh),
            _ => None,
        }
    }

    pub fn start_text(self) -> &'static str {
        match self {
            Language::En => START_TEXT,
            Language::Zh => START_TEXT_ZH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackConfig {
    /// When false, events are drained without calling the notifier
    pub enabled: bool,
    pub language: Language,
    /// Shown when a game starts
    pub start_text: String,
    /// Shown when a game is reset
    pub reset_text: String,
    /// Shown when the notifier fails
    pub fallback_text: String,
    /// Happy mood duration after a line clear
    pub happy_for: Duration,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

impl FeedbackConfig {
    /// Defaults with the canned lines of `language`
    pub fn for_language(language: Language) -> Self {
        Self {
            enabled: true,
            language,
            start_text: language.start_text().to_string(),
            reset_text: RESET_TEXT.to_string(),
            fallback_text: FALLBACK_TEXT.to_string(),
            happy_for: Duration::from_millis(HAPPY_MS),
        }
    }

    /// Create from environment variables
    ///
    /// - `PET_TETRIS_FEEDBACK_DISABLED`: `1`/`true`/`yes` turns notifications off
    /// - `PET_TETRIS_LANG`: `en` (default) or `zh`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let disabled = lookup("PET_TETRIS_FEEDBACK_DISABLED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let language = match lookup("PET_TETRIS_LANG") {
            Some(tag) => Language::parse(&tag).unwrap_or_else(|| {
                log::warn!("unknown PET_TETRIS_LANG {tag:?}, using English");
                Language::En
            }),
            None => Language::En,
        };

        Self {
            enabled: !disabled,
            ..Self::for_language(language)
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
