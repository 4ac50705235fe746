//! Locale tags and the handful of localized strings the widgets render.
//!
//! This is deliberately small: month and weekday names, default
//! placeholders, the multi-select count text and a numeric date format.
//! Spanish, English, French, German and Portuguese have translated strings;
//! other languages use the English strings with their own date order.

use crate::error::{UiError, UiResult};
use std::fmt;
use time::Date;

/// Locale used when neither the widget nor the system provides one.
pub const DEFAULT_LOCALE: &str = "es-ES";

/// A BCP 47 style locale tag, e.g. `es-ES` or `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
    tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strings {
    Es,
    En,
    Fr,
    De,
    Pt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Dmy,
    Mdy,
    Ymd,
}

impl Locale {
    /// Parse a locale tag. Accepts `-` or `_` separators and ignores a
    /// POSIX encoding suffix such as `.UTF-8`.
    pub fn parse(tag: &str) -> UiResult<Self> {
        let invalid = || UiError::InvalidLocale(tag.to_string());
        let base = tag.trim().split(['.', '@']).next().unwrap_or_default();
        let mut subtags = base.split(['-', '_']);

        let language = subtags.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        let language = language.to_ascii_lowercase();

        let mut region = None;
        let mut canonical = language.clone();
        for subtag in subtags {
            if subtag.is_empty()
                || subtag.len() > 8
                || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
            let is_region = (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
                || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()));
            let normalized = if is_region && region.is_none() {
                let upper = subtag.to_ascii_uppercase();
                region = Some(upper.clone());
                upper
            } else if subtag.len() == 4 {
                let mut chars = subtag.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase())
                    .unwrap_or_default()
            } else {
                subtag.to_ascii_lowercase()
            };
            canonical.push('-');
            canonical.push_str(&normalized);
        }

        Ok(Self {
            language,
            region,
            tag: canonical,
        })
    }

    /// Locale of the running system, falling back to [`DEFAULT_LOCALE`].
    pub fn system() -> Self {
        sys_locale::get_locale()
            .and_then(|tag| match Self::parse(&tag) {
                Ok(locale) => Some(locale),
                Err(err) => {
                    tracing::debug!(%err, "ignoring system locale");
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn strings(&self) -> Strings {
        match self.language.as_str() {
            "es" | "ca" | "gl" => Strings::Es,
            "fr" => Strings::Fr,
            "de" => Strings::De,
            "pt" => Strings::Pt,
            _ => Strings::En,
        }
    }

    fn order_and_separator(&self) -> (Order, char) {
        match (self.language.as_str(), self.region.as_deref()) {
            ("en", Some("US" | "PH")) | ("en", None) => (Order::Mdy, '/'),
            ("de", _) => (Order::Dmy, '.'),
            ("nl", _) => (Order::Dmy, '-'),
            ("ja" | "zh" | "ko", _) => (Order::Ymd, '/'),
            ("sv" | "lt", _) => (Order::Ymd, '-'),
            _ => (Order::Dmy, '/'),
        }
    }

    /// Numeric date with 2-digit day and month and a full year, in the
    /// locale's field order, e.g. `15/03/2024` for `es-ES`.
    pub fn format_date(&self, date: Date) -> String {
        let (order, sep) = self.order_and_separator();
        let (y, m, d) = (date.year(), u8::from(date.month()), date.day());
        match order {
            Order::Dmy => format!("{d:02}{sep}{m:02}{sep}{y}"),
            Order::Mdy => format!("{m:02}{sep}{d:02}{sep}{y}"),
            Order::Ymd => format!("{y}{sep}{m:02}{sep}{d:02}"),
        }
    }

    /// Full month names, January first.
    pub fn month_names(&self) -> [&'static str; 12] {
        match self.strings() {
            Strings::Es => [
                "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto",
                "Septiembre", "Octubre", "Noviembre", "Diciembre",
            ],
            Strings::En => [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ],
            Strings::Fr => [
                "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août",
                "Septembre", "Octobre", "Novembre", "Décembre",
            ],
            Strings::De => [
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
                "September", "Oktober", "November", "Dezember",
            ],
            Strings::Pt => [
                "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto",
                "Setembro", "Outubro", "Novembro", "Dezembro",
            ],
        }
    }

    /// Month name truncated to three characters, as shown in the month panel.
    pub fn month_abbreviation(&self, month: time::Month) -> String {
        let index = u8::from(month) as usize - 1;
        self.month_names()[index].chars().take(3).collect()
    }

    /// Weekday headers, Monday first.
    pub fn weekday_short(&self) -> [&'static str; 7] {
        match self.strings() {
            Strings::Es => ["Lu", "Ma", "Mi", "Ju", "Vi", "Sá", "Do"],
            Strings::En => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
            Strings::Fr => ["Lu", "Ma", "Me", "Je", "Ve", "Sa", "Di"],
            Strings::De => ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
            Strings::Pt => ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"],
        }
    }

    pub fn select_placeholder(&self) -> &'static str {
        match self.strings() {
            Strings::Es => "Seleccionar...",
            Strings::En => "Select...",
            Strings::Fr => "Sélectionner...",
            Strings::De => "Auswählen...",
            Strings::Pt => "Selecionar...",
        }
    }

    pub fn date_placeholder(&self) -> &'static str {
        match self.strings() {
            Strings::Es => "Seleccionar fecha",
            Strings::En => "Select date",
            Strings::Fr => "Sélectionner une date",
            Strings::De => "Datum auswählen",
            Strings::Pt => "Selecionar data",
        }
    }

    /// "N selected" text of a multi-select showing a count.
    pub fn selected_count(&self, n: usize) -> String {
        match self.strings() {
            Strings::Es => format!("{n} seleccionados"),
            Strings::En => format!("{n} selected"),
            Strings::Fr => format!("{n} sélectionnés"),
            Strings::De => format!("{n} ausgewählt"),
            Strings::Pt => format!("{n} selecionados"),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "es".to_string(),
            region: Some("ES".to_string()),
            tag: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl std::str::FromStr for Locale {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_normalizes() {
        let locale = Locale::parse("es_es.UTF-8").unwrap();
        assert_eq!(locale.tag(), "es-ES");
        assert_eq!(locale.language(), "es");
        assert_eq!(locale.region(), Some("ES"));

        assert_eq!(Locale::parse("zh-hans-cn").unwrap().tag(), "zh-Hans-CN");
        assert_eq!(Locale::parse("es-419").unwrap().region(), Some("419"));
        assert_eq!(Locale::parse("fr").unwrap().region(), None);
    }

    #[test]
    fn test_parse_rejects() {
        for tag in ["", "e", "english", "es--ES", "es-ES!", "12"] {
            assert!(
                matches!(Locale::parse(tag), Err(UiError::InvalidLocale(_))),
                "{tag} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_is_spanish() {
        let locale = Locale::default();
        assert_eq!(locale, Locale::parse(DEFAULT_LOCALE).unwrap());
        assert_eq!(locale.select_placeholder(), "Seleccionar...");
        assert_eq!(locale.date_placeholder(), "Seleccionar fecha");
    }

    #[test]
    fn test_format_date_orders() {
        let d = date!(2024 - 03 - 05);
        let fmt = |tag: &str| Locale::parse(tag).unwrap().format_date(d);
        assert_eq!(fmt("es-ES"), "05/03/2024");
        assert_eq!(fmt("en-GB"), "05/03/2024");
        assert_eq!(fmt("en-US"), "03/05/2024");
        assert_eq!(fmt("de-DE"), "05.03.2024");
        assert_eq!(fmt("nl-NL"), "05-03-2024");
        assert_eq!(fmt("ja-JP"), "2024/03/05");
        assert_eq!(fmt("sv-SE"), "2024-03-05");
    }

    #[test]
    fn test_names() {
        let es = Locale::default();
        assert_eq!(es.month_names()[0], "Enero");
        assert_eq!(es.month_abbreviation(time::Month::September), "Sep");
        assert_eq!(es.weekday_short()[5], "Sá");
        assert_eq!(es.selected_count(3), "3 seleccionados");

        let en = Locale::parse("en-US").unwrap();
        assert_eq!(en.weekday_short()[0], "Mo");
        assert_eq!(en.selected_count(2), "2 selected");

        let it = Locale::parse("it-IT").unwrap();
        assert_eq!(it.select_placeholder(), "Select...");
    }

    #[test]
    fn test_system_locale_parses() {
        let locale = Locale::system();
        assert!(!locale.tag().is_empty());
    }
}
