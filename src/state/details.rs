use chrono::{Datelike, Local, NaiveDate};

use super::data::Project;

const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

/// Parse a manifest date. Accepts `YYYY-MM-DD` and full RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// "marzo de 2023", or "N/A" when missing or unreadable
pub fn format_date(raw: Option<&str>) -> String {
    match raw.and_then(parse_date) {
        Some(date) => format!("{} de {}", MONTHS_ES[date.month0() as usize], date.year()),
        None => "N/A".to_string(),
    }
}

/// End date label: a running project shows "En curso"
pub fn format_end_date(project: &Project) -> String {
    match project.end_date.as_deref() {
        Some(_) => format_date(project.end_date.as_deref()),
        None => "En curso".to_string(),
    }
}

/// Duration in whole months (30-day months, rounded).
/// Running projects are measured up to `today`. None without a start date.
pub fn duration_label(project: &Project, today: NaiveDate) -> Option<String> {
    let start = parse_date(project.start_date.as_deref()?)?;
    let end = project
        .end_date
        .as_deref()
        .and_then(parse_date)
        .unwrap_or(today);

    let days = (end - start).num_days() as f64;
    let months = (days / 30.0).round() as i64;

    Some(match months {
        m if m <= 0 => "En inicio".to_string(),
        1 => "1 mes".to_string(),
        m => format!("{} meses", m),
    })
}

/// [`duration_label`] measured up to the local date
pub fn duration_until_now(project: &Project) -> Option<String> {
    duration_label(project, Local::now().date_naive())
}
