use std::fmt::Display;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    Ar,
    #[default]
    En,
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Ar => write!(f, "ar"),
            Language::En => write!(f, "en"),
        }
    }
}

/// Anything with a user facing name in both supported languages.
pub trait Localized {
    fn label(&self, language: Language) -> &'static str;
}

/// Picks between an Arabic and an English string.
pub fn pick(language: Language, ar: &'static str, en: &'static str) -> &'static str {
    match language {
        Language::Ar => ar,
        Language::En => en,
    }
}

/// Currency suffix used when printing amounts.
pub fn currency(language: Language) -> &'static str {
    pick(language, "دج", "DZD")
}
