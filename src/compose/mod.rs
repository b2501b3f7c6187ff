//! Turns a [CertificateData] record into the ordered list of [DrawCommand]s
//! that make up the certificate.
//!
//! Each phase is a pure function of the data, the layout and the font
//! registry, returning its own commands. Phases run in a fixed order and
//! later phases may draw over earlier ones: the frame is painted first, the
//! watermark last.

mod fields;
mod footer;
mod frame;
mod signature;

pub use fields::filler_count;

use crate::certificate::CertificateData;
use crate::colour::Colour;
use crate::command::{DrawCommand, SpanFont, TextRun};
use crate::config::{FontRole, LayoutConfig};
use crate::fonts::{FontHandle, FontRegistry};
use crate::image::Image;
use crate::units::Pt;

/// External resources a render may draw, loaded once per render
#[derive(Debug, Default)]
pub struct Assets {
    pub signature: Option<Image>,
}

impl Assets {
    /// Load the signature image named by the layout. Any failure to read or
    /// decode it leaves the signature empty, which selects the text substitute.
    pub fn load(config: &LayoutConfig) -> Assets {
        let signature = config.signature.image.as_ref().and_then(|path| {
            Image::new_from_disk(path)
                .map_err(|e| {
                    log::warn!(
                        "signature image {} unavailable, using text signature: {}",
                        path.display(),
                        e
                    )
                })
                .ok()
        });
        Assets { signature }
    }
}

/// Everything a phase reads
pub(crate) struct Context<'a> {
    pub data: &'a CertificateData,
    pub config: &'a LayoutConfig,
    pub fonts: &'a FontRegistry,
    pub assets: &'a Assets,
}

impl Context<'_> {
    /// The font for a role, falling back to the body font when the role's
    /// font isn't registered (or, for decorative roles, isn't configured)
    pub fn font(&self, role: FontRole) -> FontHandle {
        let roles = &self.config.fonts;
        let body = roles.body.as_str();
        let name = match role {
            FontRole::Title => Some(roles.title.as_str()),
            FontRole::Body => Some(body),
            FontRole::Signature => Some(roles.signature.as_str()),
            FontRole::DecorativeRegular => roles.decorative_regular.as_deref(),
            FontRole::DecorativeMedium => roles.decorative_medium.as_deref(),
        };
        self.fonts.resolve(name.unwrap_or(body), body)
    }

    pub fn width_of_text(&self, font: FontHandle, text: &str, size: Pt) -> Pt {
        self.fonts.width_of_text(font, text, size)
    }

    pub fn run<S: Into<String>>(
        &self,
        text: S,
        role: FontRole,
        size: Pt,
        colour: Colour,
        coords: (Pt, Pt),
    ) -> TextRun {
        TextRun {
            text: text.into(),
            font: SpanFont {
                id: self.font(role),
                size,
            },
            colour,
            coords,
        }
    }

    /// A run horizontally centred on `centre_x`
    pub fn centred<S: Into<String>>(
        &self,
        text: S,
        role: FontRole,
        size: Pt,
        colour: Colour,
        centre_x: Pt,
        baseline: Pt,
    ) -> TextRun {
        let text = text.into();
        let width = self.width_of_text(self.font(role), &text, size);
        self.run(text, role, size, colour, (centre_x - width / 2.0, baseline))
    }
}

/// Compose the full certificate: frame, header, patient block, medical
/// block, signature, footer and watermark, in that order
pub fn compose(
    data: &CertificateData,
    config: &LayoutConfig,
    fonts: &FontRegistry,
    assets: &Assets,
) -> Vec<DrawCommand> {
    let cx = Context {
        data,
        config,
        fonts,
        assets,
    };

    let phases: [(&str, fn(&Context) -> Vec<DrawCommand>); 7] = [
        ("frame", frame::background),
        ("header", frame::header),
        ("patient", fields::patient_block),
        ("medical", fields::medical_block),
        ("signature", signature::signature),
        ("footer", footer::footer),
        ("watermark", footer::watermark),
    ];

    let mut commands = Vec::new();
    for (name, phase) in phases {
        let drawn = phase(&cx);
        log::debug!("{} phase: {} commands", name, drawn.len());
        commands.extend(drawn);
    }
    commands
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::certificate::tests::jorge_jara;

    pub(crate) fn compose_default(data: &CertificateData) -> (FontRegistry, Vec<DrawCommand>) {
        let fonts = FontRegistry::new();
        let commands = compose(data, &LayoutConfig::default(), &fonts, &Assets::default());
        (fonts, commands)
    }

    pub(crate) fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(DrawCommand::text_run)
            .map(|run| run.text.as_str())
            .collect()
    }

    #[test]
    fn phases_run_frame_first_and_watermark_last() {
        let (_, commands) = compose_default(&jorge_jara());
        assert!(matches!(
            commands.first(),
            Some(DrawCommand::Rectangle { fill: Some(_), .. })
        ));
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::RotatedText { .. })
        ));
    }

    #[test]
    fn unconfigured_decorative_role_uses_body() {
        let mut config = LayoutConfig::default();
        config.fonts.decorative_regular = None;
        let fonts = FontRegistry::new();
        let data = jorge_jara();
        let assets = Assets::default();
        let cx = Context {
            data: &data,
            config: &config,
            fonts: &fonts,
            assets: &assets,
        };
        assert_eq!(
            cx.font(FontRole::DecorativeRegular),
            fonts.resolve("Helvetica", "Helvetica")
        );
        assert_eq!(
            fonts[cx.font(FontRole::Title)].name(),
            "Helvetica-Bold"
        );
    }

    #[test]
    fn missing_signature_file_leaves_assets_empty() {
        let mut config = LayoutConfig::default();
        config.signature.image = Some("/nonexistent/firma.png".into());
        assert!(Assets::load(&config).signature.is_none());
    }
}
