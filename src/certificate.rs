use chrono::{Local, NaiveDate};
use serde::Deserialize;

/// The patient details printed on one certificate.
///
/// Values are expected to have been validated before they reach the
/// compositor: names are non-empty letters, the national id is 7 to 8 digits,
/// rest hours are within 1..=720 and the free text is 10 to 500 characters.
/// The compositor makes no attempt to re-check them; it only lays them out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    pub name: String,
    pub last_name: String,
    pub national_id: String,
    pub diagnostic_code: String,
    pub rest_hours: u16,
    pub free_text: String,
    /// Defaults to the date of rendering when absent
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
}

impl CertificateData {
    /// Full name as printed on the certificate: `NAME LASTNAME`, uppercased
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.trim(), self.last_name.trim()).to_uppercase()
    }

    /// The issue date, or today's local date when none was supplied
    pub fn issue_date_or_today(&self) -> NaiveDate {
        self.issue_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// `dd/mm/yyyy`, zero padded
    pub fn formatted_issue_date(&self) -> String {
        self.issue_date_or_today().format("%d/%m/%Y").to_string()
    }
}
