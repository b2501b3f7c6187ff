use chrono::NaiveDate;
use medcert::fonts::FontRegistry;
use medcert::{
    attachment_filename, compose, filler_count, render, Assets, CertificateData, DrawCommand,
    Error, LayoutConfig, Pt,
};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn jorge_jara() -> CertificateData {
    CertificateData {
        name: "JORGE".into(),
        last_name: "JARA".into(),
        national_id: "33824963".into(),
        diagnostic_code: "B349".into(),
        rest_hours: 24,
        free_text: "Sindrome gripal".into(),
        issue_date: NaiveDate::from_ymd_opt(2024, 5, 10),
    }
}

fn occurrences(haystack: &[u8], needle: &str) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle.as_bytes())
        .count()
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    occurrences(haystack, needle) > 0
}

/// The licence is printed in the header and again under the signature
/// when the text substitute is drawn
const LICENSE: &str = "(M.N. 123456 - M.P. 65432)";

/// Registers the monospaced fixture font under both decorative names
fn decorative_fonts() -> FontRegistry {
    let font = PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/DejaVuSansMono.ttf"
    ));
    let mut files = BTreeMap::new();
    files.insert("Caveat-Regular".to_string(), font.clone());
    files.insert("Caveat-Medium".to_string(), font);

    let mut fonts = FontRegistry::new();
    assert!(fonts.register_fonts(&files).all_registered());
    fonts
}

/// Every text run drawn, in order
fn texts(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(DrawCommand::text_run)
        .map(|run| run.text.clone())
        .collect()
}

#[test]
fn renders_a_pdf() {
    init_logging();
    let pdf = render(&jorge_jara(), &LayoutConfig::default(), &FontRegistry::new()).unwrap();
    assert!(!pdf.is_empty());
    assert_eq!(pdf.len(), pdf.as_bytes().len());
    assert!(pdf.as_bytes().starts_with(b"%PDF-"));
    assert!(contains(pdf.as_bytes(), "%%EOF"));
}

#[test]
fn scenario_prints_name_and_date() {
    init_logging();
    let pdf = render(&jorge_jara(), &LayoutConfig::default(), &FontRegistry::new()).unwrap();
    let bytes = pdf.into_bytes();
    assert!(contains(&bytes, "(JORGE JARA)"));
    assert!(contains(&bytes, "(10/05/2024)"));
    assert!(contains(&bytes, "(B349)"));
    assert!(contains(&bytes, "(24 horas)"));
    assert_eq!(
        attachment_filename(&jorge_jara()),
        "certificado-33824963-20240510.pdf"
    );
}

#[test]
fn identical_inputs_give_identical_bytes() {
    let config = LayoutConfig::default();
    let fonts = FontRegistry::new();
    let first = render(&jorge_jara(), &config, &fonts).unwrap();
    let second = render(&jorge_jara(), &config, &fonts).unwrap();
    assert_eq!(first, second);

    let mut other = jorge_jara();
    other.rest_hours = 48;
    assert_ne!(first, render(&other, &config, &fonts).unwrap());
}

#[test]
fn maximum_values_render_and_clamp_the_filler() {
    init_logging();
    let mut data = jorge_jara();
    data.rest_hours = 720;
    data.free_text = "x".repeat(500);

    let config = LayoutConfig::default();
    let fonts = FontRegistry::new();
    let pdf = render(&data, &config, &fonts).unwrap();
    assert!(pdf.as_bytes().starts_with(b"%PDF-"));
    assert!(contains(pdf.as_bytes(), "(720 horas)"));
    assert!(contains(pdf.as_bytes(), &format!("({})", data.free_text)));

    let body = fonts.resolve(&config.fonts.body, "Helvetica");
    let reason = config.fields.reason;
    let filler = reason.filler.unwrap();
    let width = fonts.width_of_text(body, &data.free_text, reason.value_size);
    assert!(width > filler.available_width);
    assert_eq!(
        filler_count(filler.available_width, width, filler.per_dot_advance),
        0
    );

    let commands = compose(&data, &config, &fonts, &Assets::default());
    let drawn = texts(&commands);
    let index = drawn.iter().position(|text| *text == data.free_text).unwrap();
    assert_eq!(drawn[index + 1], "Reposo indicado:");
}

#[test]
fn long_names_overflow_without_failing() {
    let mut data = jorge_jara();
    data.name = "MARIA DE LOS ANGELES DEL ROSARIO".into();
    data.last_name = "GUTIERREZ PEREYRA DE LA SANTISIMA TRINIDAD".into();
    let pdf = render(&data, &LayoutConfig::default(), &FontRegistry::new()).unwrap();
    assert!(contains(pdf.as_bytes(), &format!("({})", data.full_name())));
}

#[test]
fn unloadable_fonts_fall_back_to_builtins() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("Caveat-Regular.ttf");
    std::fs::File::create(&garbage)
        .unwrap()
        .write_all(b"definitely not a font")
        .unwrap();

    let mut files = BTreeMap::new();
    files.insert("Caveat-Regular".to_string(), garbage);
    files.insert(
        "Caveat-Medium".to_string(),
        dir.path().join("Caveat-Medium.ttf"),
    );
    files.insert("Helvetica".to_string(), dir.path().join("Helvetica.ttf"));

    let mut fonts = FontRegistry::new();
    let result = fonts.register_fonts(&files);
    assert!(result.registered.is_empty());
    assert_eq!(result.failed.len(), 3);
    assert!(matches!(
        fonts.register_bytes("Helvetica", Vec::new()),
        Err(Error::BuiltinShadowed(_))
    ));

    let pdf = render(&jorge_jara(), &LayoutConfig::default(), &fonts).unwrap();
    let baseline = render(&jorge_jara(), &LayoutConfig::default(), &FontRegistry::new()).unwrap();
    assert_eq!(pdf, baseline);
    assert!(!contains(pdf.as_bytes(), "/FontFile2"));
}

#[test]
fn missing_signature_image_draws_text_substitute() {
    init_logging();
    let config = LayoutConfig::from_json(
        r#"{ "signature_image": "/definitely/not/here/firma.png" }"#,
    )
    .unwrap();
    let pdf = render(&jorge_jara(), &config, &FontRegistry::new()).unwrap();
    let bytes = pdf.as_bytes();
    assert_eq!(occurrences(bytes, LICENSE), 2);
    assert_eq!(occurrences(bytes, "(Medicina General y Familiar)"), 2);
    assert!(!contains(bytes, "/Im0"));
}

#[test]
fn corrupt_signature_image_draws_text_substitute() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firma.png");
    std::fs::write(&path, b"\x89PNG\r\n\x1a\nbroken").unwrap();

    let mut config = LayoutConfig::default();
    config.signature.image = Some(path);
    let pdf = render(&jorge_jara(), &config, &FontRegistry::new()).unwrap();
    assert_eq!(occurrences(pdf.as_bytes(), LICENSE), 2);
    assert!(!contains(pdf.as_bytes(), "/Im0"));
}

#[test]
fn signature_image_is_embedded_with_its_mask() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firma.png");
    let mut signature = image::RgbaImage::new(24, 10);
    for (x, _, pixel) in signature.enumerate_pixels_mut() {
        *pixel = image::Rgba([20, 30, 120, if x % 2 == 0 { 255 } else { 0 }]);
    }
    signature.save(&path).unwrap();

    let mut config = LayoutConfig::default();
    config.signature.image = Some(path);
    let pdf = render(&jorge_jara(), &config, &FontRegistry::new()).unwrap();
    let bytes = pdf.as_bytes();
    assert!(contains(bytes, "/Im0 Do"));
    assert!(contains(bytes, "/SMask"));
    assert_eq!(occurrences(bytes, LICENSE), 1);
}

#[test]
fn watermark_can_be_disabled() {
    let config = LayoutConfig::from_json(r#"{ "watermark": { "enabled": false } }"#).unwrap();
    let pdf = render(&jorge_jara(), &config, &FontRegistry::new()).unwrap();
    assert!(!contains(pdf.as_bytes(), "/ExtGState"));

    let pdf = render(&jorge_jara(), &LayoutConfig::default(), &FontRegistry::new()).unwrap();
    assert!(contains(pdf.as_bytes(), "/ExtGState"));
}

#[test]
fn creation_date_is_the_issue_date() {
    let pdf = render(&jorge_jara(), &LayoutConfig::default(), &FontRegistry::new()).unwrap();
    assert!(contains(pdf.as_bytes(), "(D:20240510"));
}

#[test]
fn concurrent_renders_share_config_and_fonts() {
    let config = LayoutConfig::default();
    let fonts = FontRegistry::new();
    let expected = render(&jorge_jara(), &config, &fonts).unwrap();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| render(&jorge_jara(), &config, &fonts)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    assert!(results.iter().all(|pdf| *pdf == expected));
}

#[test]
fn layout_overrides_move_the_page() {
    let config = LayoutConfig::from_json(r#"{ "page": "A4" }"#).unwrap();
    let pdf = render(&jorge_jara(), &config, &FontRegistry::new()).unwrap();
    let (width, height) = medcert::pagesize::A4;
    assert_eq!((config.width, config.height), (width, height));
    assert!(width > Pt(500.0));
    assert!(contains(pdf.as_bytes(), "/MediaBox"));
}

#[test]
fn decorative_values_are_drawn_and_measured_in_embedded_fonts() {
    init_logging();
    let data = jorge_jara();
    let config = LayoutConfig::default();
    let fonts = decorative_fonts();
    let medium = fonts.get("Caveat-Medium").unwrap();
    let regular = fonts.get("Caveat-Regular").unwrap();

    let commands = compose(&data, &config, &fonts, &Assets::default());
    let runs: Vec<_> = commands
        .iter()
        .filter_map(DrawCommand::text_run)
        .collect();
    let name = runs.iter().position(|run| run.text == "JORGE JARA").unwrap();
    assert_eq!(runs[name].font.id, medium);
    let reason = runs.iter().find(|run| run.text == data.free_text).unwrap();
    assert_eq!(reason.font.id, regular);

    let layout = config.fields.full_name;
    let filler = layout.filler.unwrap();
    let measured = fonts.width_of_text(medium, "JORGE JARA", layout.value_size);
    let dots = filler_count(filler.available_width, measured, filler.per_dot_advance);
    assert!(dots > 0);
    assert_eq!(runs[name + 1].text, ".".repeat(dots));

    let helvetica = fonts.resolve("Helvetica", "Helvetica");
    let builtin = fonts.width_of_text(helvetica, "JORGE JARA", layout.value_size);
    assert_ne!(
        dots,
        filler_count(filler.available_width, builtin, filler.per_dot_advance)
    );
}

#[test]
fn embedded_fonts_are_written_deterministically() {
    let mut data = jorge_jara();
    data.free_text = "Sindrome gripal ñandú → 漢".into();
    let config = LayoutConfig::default();
    let fonts = decorative_fonts();

    let first = render(&data, &config, &fonts).unwrap();
    let second = render(&data, &config, &fonts).unwrap();
    assert_eq!(first, second);

    let bytes = first.as_bytes();
    assert_eq!(occurrences(bytes, "/Subtype /Type0"), 2);
    assert_eq!(occurrences(bytes, "/FontFile2"), 2);
    assert_eq!(occurrences(bytes, "/ToUnicode"), 2);
    assert!(!contains(bytes, "(JORGE JARA)"));
    assert!(contains(bytes, "(Fecha:)"));
}
