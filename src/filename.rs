use crate::certificate::CertificateData;
use slug::slugify;

/// The attachment name a certificate is served under:
/// `certificado-<id>-<yyyymmdd>.pdf`, where `<id>` is the digits of the
/// national id, or the slugged full name when the id has no digits.
///
/// The result is lowercase ASCII without path separators or quotes.
///
/// ```
/// # use medcert::{attachment_filename, CertificateData};
/// # use chrono::NaiveDate;
/// let data = CertificateData {
///     name: "Jorge".into(),
///     last_name: "Jara".into(),
///     national_id: "33.824.963".into(),
///     diagnostic_code: "B349".into(),
///     rest_hours: 24,
///     free_text: "Sindrome gripal".into(),
///     issue_date: NaiveDate::from_ymd_opt(2024, 5, 10),
/// };
/// assert_eq!(attachment_filename(&data), "certificado-33824963-20240510.pdf");
/// ```
pub fn attachment_filename(data: &CertificateData) -> String {
    let digits: String = data
        .national_id
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let subject = if digits.is_empty() {
        slugify(format!("{} {}", data.name, data.last_name))
    } else {
        digits
    };
    let subject = if subject.is_empty() {
        "paciente".to_string()
    } else {
        subject
    };
    let date = data.issue_date_or_today().format("%Y%m%d");
    format!("certificado-{subject}-{date}.pdf")
}
