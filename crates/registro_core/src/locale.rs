//! Injected formatting configuration for export and calendar rendering.
//!
//! # Responsibility
//! - Carry localized month names and field labels as plain data.
//! - Render long/short dates without touching any runtime locale state.
//!
//! # Invariants
//! - Rendering is pure; identical inputs produce identical strings.

use chrono::{Datelike, NaiveDate};

/// Localized strings consumed by the export composers.
///
/// Passed explicitly so the core stays testable independent of any global
/// locale; the shipped application always uses `LocaleConfig::spanish()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Month names indexed January..December.
    pub month_names: [&'static str; 12],
    /// Labels for the six entry text fields in canonical order:
    /// done, thought, consumed, work, mood, note.
    pub field_labels: [&'static str; 6],
}

impl LocaleConfig {
    /// The application's fixed Spanish locale.
    pub fn spanish() -> Self {
        Self {
            month_names: [
                "enero",
                "febrero",
                "marzo",
                "abril",
                "mayo",
                "junio",
                "julio",
                "agosto",
                "septiembre",
                "octubre",
                "noviembre",
                "diciembre",
            ],
            field_labels: [
                "Hecho",
                "Pensado",
                "Leído / visto / escuchado",
                "Trabajo / creación",
                "Estado de ánimo",
                "Nota suelta",
            ],
        }
    }

    /// Long-form date used for entry headings, e.g. `5 de enero de 2026`.
    pub fn long_date(&self, day: NaiveDate) -> String {
        let month = self.month_names[(day.month0()) as usize];
        format!("{} de {} de {}", day.day(), month, day.year())
    }

    /// Short numeric date, e.g. `05/01/2026`.
    pub fn short_date(&self, day: NaiveDate) -> String {
        day.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::LocaleConfig;
    use chrono::NaiveDate;

    #[test]
    fn long_date_uses_spanish_month_names() {
        let locale = LocaleConfig::spanish();
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(locale.long_date(day), "5 de enero de 2026");

        let december = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(locale.long_date(december), "31 de diciembre de 2026");
    }

    #[test]
    fn short_date_is_zero_padded() {
        let locale = LocaleConfig::spanish();
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(locale.short_date(day), "05/01/2026");
    }
}
