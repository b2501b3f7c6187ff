//! Renders the reference certificate to disk.
//!
//! ```text
//! cargo run --example render_certificate -- [out.pdf] [overrides.json] [Name=font.ttf ...]
//! ```
//!
//! Fonts given as `Name=path` are registered before rendering; the default
//! layout uses `Caveat-Regular` and `Caveat-Medium` for patient values and
//! falls back to Helvetica without them. Set `RUST_LOG=debug` to follow the
//! render phase by phase.

use chrono::NaiveDate;
use medcert::fonts::FontRegistry;
use medcert::{attachment_filename, render, CertificateData, LayoutConfig};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let data = CertificateData {
        name: "Jorge".into(),
        last_name: "Jara".into(),
        national_id: "33824963".into(),
        diagnostic_code: "B349".into(),
        rest_hours: 24,
        free_text: "Sindrome gripal".into(),
        issue_date: NaiveDate::from_ymd_opt(2024, 5, 10),
    };

    let out = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(attachment_filename(&data)));

    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).expect("can read layout overrides");
            LayoutConfig::from_json(&json).expect("valid layout overrides")
        }
        None => LayoutConfig::default(),
    };

    let font_files: BTreeMap<String, PathBuf> = args
        .filter_map(|arg| {
            let (name, path) = arg.split_once('=')?;
            Some((name.to_string(), PathBuf::from(path)))
        })
        .collect();
    let mut fonts = FontRegistry::new();
    let registration = fonts.register_fonts(&font_files);
    for (name, reason) in &registration.failed {
        eprintln!("font {name} not registered: {reason}");
    }

    let pdf = render(&data, &config, &fonts).expect("can render certificate");
    std::fs::write(&out, pdf.as_bytes()).expect("can write certificate");
    println!("wrote {} ({} bytes)", out.display(), pdf.len());
}
