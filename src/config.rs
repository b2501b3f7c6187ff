//! The fixed layout of the certificate and how callers adjust it.
//!
//! Every position on the page comes from a [LayoutConfig]. Vertical
//! positions are given as the distance from the *top* edge of the page down
//! to a text baseline (or a rule), which keeps the layout readable and lets
//! the page size change without every offset having to move. The compositor
//! converts them into PDF's bottom-up coordinates.
//!
//! Defaults describe the reference certificate; [LayoutOverrides] are a
//! partial, deserializable copy merged over them.

use crate::colour::{colours, Colour};
use crate::margins::Margins;
use crate::pagesize::{self, PageSize};
use crate::units::Pt;
use crate::Error;
use serde::Deserialize;
use std::path::PathBuf;

/// The four colours the certificate is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Palette {
    /// Borders, practitioner name and watermark
    pub primary: Colour,
    /// Rules, labels and secondary header lines
    pub secondary: Colour,
    /// Plain body text
    pub text: Colour,
    /// Patient values, which imitate handwriting
    pub accent: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            primary: colours::NAVY,
            secondary: colours::SLATE,
            text: colours::INK,
            accent: colours::TEAL,
        }
    }
}

/// Font names for each typographic role. `body` must name a base font so
/// that it is usable without any external resources; the decorative fonts
/// are optional and fall back to `body`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontRoles {
    pub title: String,
    pub body: String,
    pub signature: String,
    pub decorative_regular: Option<String>,
    pub decorative_medium: Option<String>,
}

impl Default for FontRoles {
    fn default() -> Self {
        FontRoles {
            title: "Helvetica-Bold".into(),
            body: "Helvetica".into(),
            signature: "Times-Bold".into(),
            decorative_regular: Some("Caveat-Regular".into()),
            decorative_medium: Some("Caveat-Medium".into()),
        }
    }
}

/// Which entry of [FontRoles] a text run is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    Title,
    Body,
    Signature,
    DecorativeRegular,
    DecorativeMedium,
}

/// The practitioner issuing the certificate, printed in the header and
/// beneath the signature
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Practitioner {
    pub name: String,
    pub title: String,
    pub specialty: String,
    pub license: String,
}

impl Default for Practitioner {
    fn default() -> Self {
        Practitioner {
            name: "Dr. Martín Gómez".into(),
            title: "Médico Cirujano".into(),
            specialty: "Medicina General y Familiar".into(),
            license: "M.N. 123456 - M.P. 65432".into(),
        }
    }
}

/// Every fixed caption printed on the certificate
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub full_name: String,
    pub national_id: String,
    pub reason: String,
    pub rest_hours: String,
    /// Appended to the number of rest hours, e.g. `24 horas`
    pub hours_suffix: String,
    pub diagnosis: String,
    pub date: String,
    pub caption: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            full_name: "Apellido y Nombre:".into(),
            national_id: "DNI:".into(),
            reason: "Motivo:".into(),
            rest_hours: "Reposo indicado:".into(),
            hours_suffix: "horas".into(),
            diagnosis: "Diagnóstico (CIE-10):".into(),
            date: "Fecha:".into(),
            caption: "Certificado médico emitido digitalmente".into(),
        }
    }
}

/// The dotted line that pads a value out to the width of its slot
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FillerSpec {
    /// Width of the whole slot, value plus dots
    pub available_width: Pt,
    /// Horizontal advance of one dot at `size`
    pub per_dot_advance: Pt,
    /// Font size the dots are drawn at
    pub size: Pt,
    /// How far below the value baseline the dots sit
    pub drop: Pt,
}

/// Where one labelled field sits on the page
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FieldLayout {
    /// Left edge of the label
    pub x: Pt,
    /// Distance from the top of the page to the shared baseline
    pub top: Pt,
    pub label_size: Pt,
    pub value_size: Pt,
    /// Space between the end of the label and the value
    pub gap: Pt,
    pub value_font: FontRole,
    /// Dotted filler after the value, if this field has one
    pub filler: Option<FillerSpec>,
}

/// The per-field layout table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldTable {
    pub full_name: FieldLayout,
    pub national_id: FieldLayout,
    pub reason: FieldLayout,
    pub rest_hours: FieldLayout,
    pub diagnosis: FieldLayout,
}

/// Dots are drawn in the body font at 9pt, where a Helvetica period advances 2.502pt
const DOT: FillerSpec = FillerSpec {
    available_width: Pt(200.0),
    per_dot_advance: Pt(2.5),
    size: Pt(9.0),
    drop: Pt(1.0),
};

impl Default for FieldTable {
    fn default() -> Self {
        let field = |top: f32, value_font: FontRole, filler: Option<FillerSpec>| FieldLayout {
            x: Pt(48.0),
            top: Pt(top),
            label_size: Pt(10.0),
            value_size: Pt(12.0),
            gap: Pt(4.0),
            value_font,
            filler,
        };
        FieldTable {
            full_name: field(170.0, FontRole::DecorativeMedium, Some(DOT)),
            national_id: field(
                195.0,
                FontRole::DecorativeRegular,
                Some(FillerSpec {
                    available_width: Pt(150.0),
                    ..DOT
                }),
            ),
            reason: field(220.0, FontRole::DecorativeRegular, Some(DOT)),
            rest_hours: field(255.0, FontRole::DecorativeRegular, None),
            diagnosis: field(280.0, FontRole::DecorativeRegular, None),
        }
    }
}

/// The page frame: borders and the rules separating header, body and footer
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FrameLayout {
    pub left_border_width: Pt,
    pub border_width: Pt,
    pub rule_width: Pt,
    /// Distance from the top of the page to the rule under the header
    pub header_rule_top: Pt,
    /// Distance from the top of the page to the rule above the footer
    pub footer_rule_top: Pt,
}

impl Default for FrameLayout {
    fn default() -> Self {
        FrameLayout {
            left_border_width: Pt(6.0),
            border_width: Pt(1.0),
            rule_width: Pt(0.75),
            header_rule_top: Pt(115.0),
            footer_rule_top: Pt(470.0),
        }
    }
}

/// The three centred header lines
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HeaderLayout {
    pub name_top: Pt,
    pub name_size: Pt,
    pub specialty_top: Pt,
    pub specialty_size: Pt,
    pub license_top: Pt,
    pub license_size: Pt,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        HeaderLayout {
            name_top: Pt(60.0),
            name_size: Pt(16.0),
            specialty_top: Pt(80.0),
            specialty_size: Pt(11.0),
            license_top: Pt(97.0),
            license_size: Pt(9.0),
        }
    }
}

/// The signature image box and the anchor of its text substitute
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignatureLayout {
    /// Image to place; a missing or undecodable file falls back to text
    pub image: Option<PathBuf>,
    /// Horizontal centre of the signature block
    pub anchor_x: Pt,
    /// Distance from the top of the page to the top of the signature block
    pub anchor_top: Pt,
    pub width: Pt,
    pub height: Pt,
    /// Baseline spacing of the text substitute
    pub line_spacing: Pt,
    pub name_size: Pt,
    pub detail_size: Pt,
}

impl Default for SignatureLayout {
    fn default() -> Self {
        SignatureLayout {
            image: None,
            anchor_x: Pt(300.0),
            anchor_top: Pt(380.0),
            width: Pt(120.0),
            height: Pt(50.0),
            line_spacing: Pt(11.0),
            name_size: Pt(10.0),
            detail_size: Pt(8.0),
        }
    }
}

/// Issue date and caption at the bottom of the page
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FooterLayout {
    pub date_x: Pt,
    pub date_top: Pt,
    pub date_label_size: Pt,
    pub date_size: Pt,
    pub caption_top: Pt,
    pub caption_size: Pt,
}

impl Default for FooterLayout {
    fn default() -> Self {
        FooterLayout {
            date_x: Pt(48.0),
            date_top: Pt(500.0),
            date_label_size: Pt(10.0),
            date_size: Pt(12.0),
            caption_top: Pt(545.0),
            caption_size: Pt(7.0),
        }
    }
}

/// A large, faint, rotated caption across the middle of the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Watermark {
    pub enabled: bool,
    pub text: String,
    pub size: Pt,
    pub angle_degrees: f32,
    /// Fill opacity, 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
}

impl Default for Watermark {
    fn default() -> Self {
        Watermark {
            enabled: true,
            text: "CERTIFICADO MÉDICO".into(),
            size: Pt(40.0),
            angle_degrees: 45.0,
            opacity: 0.08,
        }
    }
}

/// Everything about the certificate that doesn't come from the patient.
/// Built once and shared, read-only, by every render.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub width: Pt,
    pub height: Pt,
    pub margins: Margins,
    pub colors: Palette,
    pub fonts: FontRoles,
    pub practitioner: Practitioner,
    pub labels: Labels,
    pub frame: FrameLayout,
    pub header: HeaderLayout,
    pub fields: FieldTable,
    pub signature: SignatureLayout,
    pub footer: FooterLayout,
    pub watermark: Watermark,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let (width, height) = pagesize::A5;
        LayoutConfig {
            width,
            height,
            margins: Margins::all(Pt(28.0)),
            colors: Palette::default(),
            fonts: FontRoles::default(),
            practitioner: Practitioner::default(),
            labels: Labels::default(),
            frame: FrameLayout::default(),
            header: HeaderLayout::default(),
            fields: FieldTable::default(),
            signature: SignatureLayout::default(),
            footer: FooterLayout::default(),
            watermark: Watermark::default(),
        }
    }
}

/// Partial palette; unset colours keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteOverrides {
    pub primary: Option<Colour>,
    pub secondary: Option<Colour>,
    pub text: Option<Colour>,
    pub accent: Option<Colour>,
}

/// Partial font roles. A decorative role set to `null` disables it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontOverrides {
    pub title: Option<String>,
    pub body: Option<String>,
    pub signature: Option<String>,
    #[serde(default, with = "nullable")]
    pub decorative_regular: Option<Option<String>>,
    #[serde(default, with = "nullable")]
    pub decorative_medium: Option<Option<String>>,
}

/// Partial watermark settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatermarkOverrides {
    pub enabled: Option<bool>,
    pub text: Option<String>,
    pub size: Option<Pt>,
    pub angle_degrees: Option<f32>,
    pub opacity: Option<f32>,
}

/// Caller adjustments to the default layout. Every member is optional;
/// the nested palette, font and watermark members are merged field by
/// field, everything else replaces the default wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutOverrides {
    /// A named page size (`A4`, `A5`, `Letter`)
    pub page: Option<String>,
    pub width: Option<Pt>,
    pub height: Option<Pt>,
    pub margins: Option<Margins>,
    pub colors: Option<PaletteOverrides>,
    pub fonts: Option<FontOverrides>,
    pub practitioner: Option<Practitioner>,
    pub labels: Option<Labels>,
    pub frame: Option<FrameLayout>,
    pub header: Option<HeaderLayout>,
    pub fields: Option<FieldTable>,
    pub signature: Option<SignatureLayout>,
    /// Shorthand for replacing only the signature image path
    pub signature_image: Option<PathBuf>,
    pub footer: Option<FooterLayout>,
    pub watermark: Option<WatermarkOverrides>,
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`)
mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

impl LayoutConfig {
    /// The default layout with `overrides` merged over it
    pub fn with_overrides(overrides: LayoutOverrides) -> Result<LayoutConfig, Error> {
        LayoutConfig::default().merge(overrides)
    }

    /// Parse [LayoutOverrides] from JSON and merge them over the default layout
    pub fn from_json(json: &str) -> Result<LayoutConfig, Error> {
        let overrides: LayoutOverrides = serde_json::from_str(json)?;
        LayoutConfig::with_overrides(overrides)
    }

    /// Merge `overrides` over this configuration
    pub fn merge(mut self, overrides: LayoutOverrides) -> Result<LayoutConfig, Error> {
        if let Some(name) = overrides.page {
            let (width, height): PageSize = pagesize::by_name(&name).ok_or_else(|| {
                Error::Config(serde::de::Error::custom(format!("unknown page size `{name}`")))
            })?;
            self.width = width;
            self.height = height;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(margins) = overrides.margins {
            self.margins = margins;
        }
        if let Some(colors) = overrides.colors {
            let palette = &mut self.colors;
            palette.primary = colors.primary.unwrap_or(palette.primary);
            palette.secondary = colors.secondary.unwrap_or(palette.secondary);
            palette.text = colors.text.unwrap_or(palette.text);
            palette.accent = colors.accent.unwrap_or(palette.accent);
        }
        if let Some(fonts) = overrides.fonts {
            let roles = &mut self.fonts;
            if let Some(title) = fonts.title {
                roles.title = title;
            }
            if let Some(body) = fonts.body {
                roles.body = body;
            }
            if let Some(signature) = fonts.signature {
                roles.signature = signature;
            }
            if let Some(regular) = fonts.decorative_regular {
                roles.decorative_regular = regular;
            }
            if let Some(medium) = fonts.decorative_medium {
                roles.decorative_medium = medium;
            }
        }
        if let Some(practitioner) = overrides.practitioner {
            self.practitioner = practitioner;
        }
        if let Some(labels) = overrides.labels {
            self.labels = labels;
        }
        if let Some(frame) = overrides.frame {
            self.frame = frame;
        }
        if let Some(header) = overrides.header {
            self.header = header;
        }
        if let Some(fields) = overrides.fields {
            self.fields = fields;
        }
        if let Some(signature) = overrides.signature {
            self.signature = signature;
        }
        if let Some(image) = overrides.signature_image {
            self.signature.image = Some(image);
        }
        if let Some(footer) = overrides.footer {
            self.footer = footer;
        }
        if let Some(watermark) = overrides.watermark {
            let current = &mut self.watermark;
            current.enabled = watermark.enabled.unwrap_or(current.enabled);
            if let Some(text) = watermark.text {
                current.text = text;
            }
            current.size = watermark.size.unwrap_or(current.size);
            current.angle_degrees = watermark.angle_degrees.unwrap_or(current.angle_degrees);
            current.opacity = watermark.opacity.unwrap_or(current.opacity).clamp(0.0, 1.0);
        }
        Ok(self)
    }

    /// Convert a distance from the top edge into a PDF y coordinate
    pub fn from_top(&self, top: Pt) -> Pt {
        self.height - top
    }

    /// Horizontal centre of the page
    pub fn centre_x(&self) -> Pt {
        self.width / 2.0
    }
}
