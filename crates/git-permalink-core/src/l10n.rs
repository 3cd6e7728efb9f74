//! Localization support using Project Fluent.
//!
//! This module provides internationalization (i18n) capabilities using the
//! Fluent localization system. Translations are embedded into the binary
//! at compile time, so message lookup never depends on the working
//! directory the tool happens to run from.
//!
//! # Supported Locales
//!
//! Currently supported languages:
//! - English (en) - Default fallback
//! - German (de)
//!
//! # Example
//!
//! ```
//! use git_permalink_core::l10n::Localizer;
//!
//! let localizer = Localizer::new("en").unwrap();
//! let message = localizer.get("host-label", None);
//! println!("{}", message);
//! ```

use crate::error::{Error, Result};
use fluent::{FluentBundle, FluentResource};
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// The default locale used when no locale is specified or loading fails.
pub const DEFAULT_LOCALE: &str = "en";

/// Manages localization resources and message formatting.
///
/// The Localizer holds the Fluent bundle for one locale and provides
/// methods to retrieve translated messages with optional variable
/// interpolation.
pub struct Localizer {
    /// The Fluent bundle containing loaded translations.
    bundle: FluentBundle<FluentResource>,
    /// The current locale identifier.
    locale: LanguageIdentifier,
}

impl Localizer {
    /// Creates a new Localizer for the specified locale.
    ///
    /// Falls back to English if the requested locale has no embedded
    /// translations.
    ///
    /// # Arguments
    ///
    /// * `locale_str` - Locale identifier (e.g., "en", "de", "en-US")
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The locale identifier is invalid
    /// - FTL syntax in an embedded resource is invalid
    ///
    /// # Example
    ///
    /// ```
    /// use git_permalink_core::l10n::Localizer;
    ///
    /// let localizer = Localizer::new("de").unwrap();
    /// ```
    pub fn new(locale_str: &str) -> Result<Self> {
        let locale: LanguageIdentifier = locale_str
            .parse()
            .map_err(|_| Error::l10n(format!("invalid locale: {locale_str}")))?;

        // Try the requested locale, fall back to the default if absent
        let (bundle, actual_locale) = Self::load_locale(&locale).or_else(|_| {
            if locale_str != DEFAULT_LOCALE {
                let default: LanguageIdentifier = DEFAULT_LOCALE
                    .parse()
                    .map_err(|_| Error::l10n("default locale is invalid".to_string()))?;
                Self::load_locale(&default)
            } else {
                Err(Error::l10n("failed to load default locale".to_string()))
            }
        })?;

        Ok(Self {
            bundle,
            locale: actual_locale,
        })
    }

    /// Creates a Localizer using the system's default locale.
    ///
    /// Detects the system locale from environment variables (LANG, LC_ALL,
    /// etc.) and loads the appropriate translations. Falls back to English
    /// if detection fails or the locale is unsupported.
    ///
    /// # Example
    ///
    /// ```
    /// use git_permalink_core::l10n::Localizer;
    ///
    /// let localizer = Localizer::from_system().unwrap();
    /// ```
    pub fn from_system() -> Result<Self> {
        let locale_str = detect_system_locale();
        // Values like "C" are not valid language identifiers; any failure
        // on the detected locale falls through to plain English.
        Self::new(&locale_str).or_else(|_| Self::new(DEFAULT_LOCALE))
    }

    /// Builds the bundle for a locale from the embedded resources.
    fn load_locale(
        locale: &LanguageIdentifier,
    ) -> Result<(FluentBundle<FluentResource>, LanguageIdentifier)> {
        let locale_code = locale.to_string();

        let ftl_content = embedded_locale(&locale_code)
            .ok_or_else(|| Error::l10n(format!("no translations for locale '{locale_code}'")))?;

        let resource = FluentResource::try_new(ftl_content.to_string())
            .map_err(|(_, errors)| Error::l10n(format!("failed to parse FTL: {errors:?}")))?;

        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        bundle
            .add_resource(resource)
            .map_err(|errors| Error::l10n(format!("failed to add FTL resource: {errors:?}")))?;

        Ok((bundle, locale.clone()))
    }

    /// Retrieves a translated message by its identifier.
    ///
    /// # Arguments
    ///
    /// * `msg_id` - The message identifier from the FTL file
    /// * `args` - Optional key-value pairs for variable interpolation
    ///
    /// # Returns
    ///
    /// The formatted message string. Returns the message ID itself if the
    /// translation is not found (graceful degradation).
    ///
    /// # Example
    ///
    /// ```
    /// # use git_permalink_core::l10n::Localizer;
    /// # let localizer = Localizer::new("en").unwrap();
    /// // Simple message without variables
    /// let msg = localizer.get("host-label", None);
    ///
    /// // Message with variables
    /// let args = [("file", "src/lib.rs"), ("rev", "abc123")];
    /// let msg = localizer.get("file-missing-at-rev", Some(&args));
    /// ```
    pub fn get(&self, msg_id: &str, args: Option<&[(&str, &str)]>) -> String {
        let message = match self.bundle.get_message(msg_id) {
            Some(msg) => msg,
            None => {
                // Graceful degradation: return the message ID if not found
                return format!("[{msg_id}]");
            }
        };

        let pattern = match message.value() {
            Some(p) => p,
            None => return format!("[{msg_id}]"),
        };

        let mut errors = vec![];
        let formatted = if let Some(args) = args {
            let mut fluent_args = fluent::FluentArgs::new();
            for (key, value) in args {
                fluent_args.set(*key, value.to_string());
            }
            self.bundle
                .format_pattern(pattern, Some(&fluent_args), &mut errors)
        } else {
            self.bundle.format_pattern(pattern, None, &mut errors)
        };

        if !errors.is_empty() {
            warn!("fluent formatting errors for '{msg_id}': {errors:?}");
        }

        formatted.to_string()
    }

    /// Gets the current locale identifier.
    ///
    /// # Example
    ///
    /// ```
    /// # use git_permalink_core::l10n::Localizer;
    /// let localizer = Localizer::new("de").unwrap();
    /// assert_eq!(localizer.locale(), "de");
    /// ```
    pub fn locale(&self) -> String {
        self.locale.to_string()
    }
}

/// Detects the system locale from environment variables.
///
/// Checks the following environment variables in order:
/// 1. `LC_ALL`
/// 2. `LC_MESSAGES`
/// 3. `LANG`
///
/// Returns the language code (the part before `_` or `.`) or "en" as
/// fallback.
///
/// # Example
///
/// With `LANG=de_DE.UTF-8`, this function returns `"de"`.
pub fn detect_system_locale() -> String {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_MESSAGES"))
        .or_else(|_| std::env::var("LANG"))
        .ok()
        .and_then(|locale| {
            locale
                .split(['_', '.'])
                .next()
                .map(|code| code.to_lowercase())
        })
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Translations compiled into the binary.
fn embedded_locale(locale_code: &str) -> Option<&'static str> {
    match locale_code {
        "en" => Some(include_str!("../locales/en/main.ftl")),
        "de" => Some(include_str!("../locales/de/main.ftl")),
        _ => None,
    }
}
