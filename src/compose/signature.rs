use super::Context;
use crate::command::DrawCommand;
use crate::config::FontRole;
use crate::rect::Rect;

/// The signature image, or when there is none, the practitioner's name,
/// title, specialty and licence stacked and centred on the same anchor
pub(super) fn signature(cx: &Context) -> Vec<DrawCommand> {
    let config = cx.config;
    let layout = &config.signature;
    let top = config.from_top(layout.anchor_top);

    if cx.assets.signature.is_some() {
        let position = Rect {
            x1: layout.anchor_x - layout.width / 2.0,
            y1: top - layout.height,
            x2: layout.anchor_x + layout.width / 2.0,
            y2: top,
        };
        return vec![DrawCommand::Image { position }];
    }

    log::debug!("no signature image, drawing text substitute");
    let practitioner = &config.practitioner;
    let mut baseline = top - layout.name_size;
    let mut commands = vec![DrawCommand::Text(cx.centred(
        practitioner.name.as_str(),
        FontRole::Signature,
        layout.name_size,
        config.colors.primary,
        layout.anchor_x,
        baseline,
    ))];
    for line in [
        &practitioner.title,
        &practitioner.specialty,
        &practitioner.license,
    ] {
        baseline -= layout.line_spacing;
        commands.push(DrawCommand::Text(cx.centred(
            line.as_str(),
            FontRole::Body,
            layout.detail_size,
            config.colors.text,
            layout.anchor_x,
            baseline,
        )));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::tests::jorge_jara;
    use crate::compose::{compose, Assets};
    use crate::config::LayoutConfig;
    use crate::fonts::FontRegistry;
    use crate::image::Image;
    use crate::units::Pt;
    use ::image::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::new(4, 2))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn text_substitute_has_four_centred_lines() {
        let config = LayoutConfig::default();
        let fonts = FontRegistry::new();
        let commands = compose(&jorge_jara(), &config, &fonts, &Assets::default());
        let runs: Vec<_> = commands
            .iter()
            .filter_map(DrawCommand::text_run)
            .skip_while(|run| run.text != "B349")
            .skip(1)
            .take(4)
            .collect();

        let lines: Vec<&str> = runs.iter().map(|run| run.text.as_str()).collect();
        assert_eq!(
            lines,
            [
                "Dr. Martín Gómez",
                "Médico Cirujano",
                "Medicina General y Familiar",
                "M.N. 123456 - M.P. 65432"
            ]
        );
        assert_eq!(fonts[runs[0].font.id].name(), "Times-Bold");
        for run in &runs {
            let width = fonts.width_of_text(run.font.id, &run.text, run.font.size);
            assert!((*(run.coords.0 + width / 2.0) - 300.0).abs() < 0.01);
        }
        assert!((*(runs[0].coords.1 - runs[1].coords.1) - 11.0).abs() < 0.01);
        assert!(!commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Image { .. })));
    }

    #[test]
    fn image_is_boxed_on_the_anchor() {
        let config = LayoutConfig::default();
        let assets = Assets {
            signature: Some(Image::new_from_bytes(tiny_png()).unwrap()),
        };
        let commands = compose(&jorge_jara(), &config, &FontRegistry::new(), &assets);
        let position = commands
            .iter()
            .find_map(|command| match command {
                DrawCommand::Image { position } => Some(*position),
                _ => None,
            })
            .unwrap();
        assert_eq!(position.centre_x(), Pt(300.0));
        assert_eq!(position.y2, config.from_top(Pt(380.0)));
        assert_eq!(position.width(), Pt(120.0));
        assert!((*position.height() - 50.0).abs() < 0.01);
        assert!(!commands
            .iter()
            .filter_map(DrawCommand::text_run)
            .any(|run| run.text == "Médico Cirujano"));
    }
}
