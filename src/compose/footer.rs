use super::Context;
use crate::command::DrawCommand;
use crate::config::FontRole;
use crate::units::Pt;

/// The issue date, labelled, and the small caption centred at the bottom
pub(super) fn footer(cx: &Context) -> Vec<DrawCommand> {
    let config = cx.config;
    let footer = &config.footer;
    let labels = &config.labels;
    let baseline = config.from_top(footer.date_top);

    let label_font = cx.font(FontRole::Title);
    let label_width = cx.width_of_text(label_font, &labels.date, footer.date_label_size);

    vec![
        DrawCommand::Text(cx.run(
            labels.date.as_str(),
            FontRole::Title,
            footer.date_label_size,
            config.colors.secondary,
            (footer.date_x, baseline),
        )),
        DrawCommand::Text(cx.run(
            cx.data.formatted_issue_date(),
            FontRole::DecorativeRegular,
            footer.date_size,
            config.colors.accent,
            (footer.date_x + label_width + Pt(4.0), baseline),
        )),
        DrawCommand::Text(cx.centred(
            labels.caption.as_str(),
            FontRole::Body,
            footer.caption_size,
            config.colors.secondary,
            config.centre_x(),
            config.from_top(footer.caption_top),
        )),
    ]
}

/// A faint caption rotated about the centre of the page
pub(super) fn watermark(cx: &Context) -> Vec<DrawCommand> {
    let config = cx.config;
    let watermark = &config.watermark;
    if !watermark.enabled || watermark.text.trim().is_empty() {
        return Vec::new();
    }

    let width = cx.width_of_text(cx.font(FontRole::Title), &watermark.text, watermark.size);
    // centre the run on the rotation origin; cap height sits near 0.7em
    let run = cx.run(
        watermark.text.as_str(),
        FontRole::Title,
        watermark.size,
        config.colors.primary,
        (Pt(0.0) - width / 2.0, Pt(0.0) - watermark.size * 0.35),
    );
    vec![DrawCommand::RotatedText {
        run,
        centre: (config.centre_x(), config.height / 2.0),
        angle_degrees: watermark.angle_degrees,
        opacity: watermark.opacity.clamp(0.0, 1.0),
    }]
}

#[cfg(test)]
mod tests {
    use crate::certificate::tests::jorge_jara;
    use crate::command::DrawCommand;
    use crate::compose::tests::{compose_default, texts};
    use crate::compose::{compose, Assets};
    use crate::config::LayoutConfig;
    use crate::fonts::FontRegistry;

    #[test]
    fn footer_shows_zero_padded_issue_date() {
        let (_, commands) = compose_default(&jorge_jara());
        let all = texts(&commands);
        let label = all.iter().position(|&text| text == "Fecha:").unwrap();
        assert_eq!(all[label + 1], "10/05/2024");
        assert_eq!(all[label + 2], "Certificado médico emitido digitalmente");
    }

    #[test]
    fn watermark_is_centred_and_faint() {
        let (_, commands) = compose_default(&jorge_jara());
        let config = LayoutConfig::default();
        match commands.last() {
            Some(DrawCommand::RotatedText {
                run,
                centre,
                angle_degrees,
                opacity,
            }) => {
                assert_eq!(run.text, "CERTIFICADO MÉDICO");
                assert_eq!(*centre, (config.centre_x(), config.height / 2.0));
                assert_eq!(*angle_degrees, 45.0);
                assert_eq!(*opacity, 0.08);
                assert!(*run.coords.0 < 0.0);
            }
            other => panic!("expected a watermark, got {:?}", other),
        }
    }

    #[test]
    fn disabled_or_blank_watermark_draws_nothing() {
        let fonts = FontRegistry::new();
        let mut config = LayoutConfig::default();
        config.watermark.enabled = false;
        let commands = compose(&jorge_jara(), &config, &fonts, &Assets::default());
        assert!(!commands
            .iter()
            .any(|command| matches!(command, DrawCommand::RotatedText { .. })));

        config.watermark.enabled = true;
        config.watermark.text = "  ".into();
        let commands = compose(&jorge_jara(), &config, &fonts, &Assets::default());
        assert!(!commands
            .iter()
            .any(|command| matches!(command, DrawCommand::RotatedText { .. })));
    }
}
