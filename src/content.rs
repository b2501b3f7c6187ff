//! Lowers [DrawCommand]s into a PDF content stream.

use crate::colour::Colour;
use crate::command::{DrawCommand, Stroke, TextRun};
use crate::fonts::{FontHandle, FontRegistry};
use crate::transform::Transform;
use pdf_writer::{Content, Name, Str};
use std::collections::BTreeMap;

/// The resources a command list refers to, in the order they are first used.
/// The position of a font or opacity here is its resource name on the page:
/// the first font used is `/F0`, the first opacity `/GS0`.
#[derive(Debug, Default)]
pub(crate) struct PageResources {
    fonts: Vec<FontHandle>,
    font_names: BTreeMap<usize, usize>,
    pub opacities: Vec<f32>,
    pub image: bool,
}

impl PageResources {
    pub fn collect(commands: &[DrawCommand]) -> PageResources {
        let mut resources = PageResources::default();
        for command in commands {
            if let Some(run) = command.text_run() {
                let font = run.font.id;
                if !resources.font_names.contains_key(&font.index()) {
                    resources
                        .font_names
                        .insert(font.index(), resources.fonts.len());
                    resources.fonts.push(font);
                }
            }
            match command {
                DrawCommand::RotatedText { opacity, .. } => {
                    if !resources.opacities.contains(opacity) {
                        resources.opacities.push(*opacity);
                    }
                }
                DrawCommand::Image { .. } => resources.image = true,
                _ => {}
            }
        }
        resources
    }

    /// Fonts paired with their resource index, in first-use order
    pub fn fonts(&self) -> impl Iterator<Item = (usize, FontHandle)> + '_ {
        self.fonts.iter().copied().enumerate()
    }

    fn font_index(&self, font: FontHandle) -> usize {
        self.font_names.get(&font.index()).copied().unwrap_or_default()
    }

    fn opacity_index(&self, opacity: f32) -> usize {
        self.opacities
            .iter()
            .position(|&o| o == opacity)
            .unwrap_or_default()
    }
}

/// Render every command, each wrapped in its own save/restore pair so no
/// graphics state leaks from one command into the next
pub(crate) fn render_contents(
    commands: &[DrawCommand],
    fonts: &FontRegistry,
    resources: &PageResources,
) -> Vec<u8> {
    let mut content = Content::new();

    for command in commands {
        content.save_state();
        match command {
            DrawCommand::Rectangle { rect, fill, stroke } => {
                if let Some(fill) = fill {
                    set_fill(&mut content, *fill);
                }
                if let Some(stroke) = stroke {
                    set_stroke(&mut content, stroke);
                }
                content.rect(*rect.x1, *rect.y1, *rect.width(), *rect.height());
                match (fill, stroke) {
                    (Some(_), Some(_)) => content.fill_nonzero_and_stroke(),
                    (Some(_), None) => content.fill_nonzero(),
                    (None, Some(_)) => content.stroke(),
                    (None, None) => content.end_path(),
                };
            }
            DrawCommand::Line { from, to, stroke } => {
                set_stroke(&mut content, stroke);
                content.move_to(*from.0, *from.1);
                content.line_to(*to.0, *to.1);
                content.stroke();
            }
            DrawCommand::Text(run) => {
                show_run(&mut content, run, fonts, resources);
            }
            DrawCommand::Image { position } => {
                Transform::scale(*position.width(), *position.height())
                    .with_translate(position.x1, position.y1)
                    .write_to_content(&mut content);
                content.x_object(Name(b"Im0"));
            }
            DrawCommand::RotatedText {
                run,
                centre,
                angle_degrees,
                opacity,
            } => {
                let state = format!("GS{}", resources.opacity_index(*opacity));
                content.set_parameters(Name(state.as_bytes()));
                Transform::rotate(*angle_degrees)
                    .with_translate(centre.0, centre.1)
                    .write_to_content(&mut content);
                show_run(&mut content, run, fonts, resources);
            }
        }
        content.restore_state();
    }

    content.finish()
}

fn show_run(content: &mut Content, run: &TextRun, fonts: &FontRegistry, resources: &PageResources) {
    let font = format!("F{}", resources.font_index(run.font.id));
    let encoded = fonts[run.font.id].encode(&run.text);
    set_fill(content, run.colour);
    content.begin_text();
    content.set_font(Name(font.as_bytes()), *run.font.size);
    content.next_line(*run.coords.0, *run.coords.1);
    content.show(Str(&encoded));
    content.end_text();
}

fn set_stroke(content: &mut Content, stroke: &Stroke) {
    match stroke.colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
    content.set_line_width(*stroke.width);
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::tests::jorge_jara;
    use crate::compose::tests::compose_default;

    fn rendered(commands: &[DrawCommand], fonts: &FontRegistry) -> String {
        let resources = PageResources::collect(commands);
        let bytes = render_contents(commands, fonts, &resources);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn fonts_are_named_in_first_use_order() {
        let (fonts, commands) = compose_default(&jorge_jara());
        let resources = PageResources::collect(&commands);
        let names: Vec<&str> = resources
            .fonts()
            .map(|(_, font)| fonts[font].name())
            .collect();
        assert_eq!(names, ["Helvetica-Bold", "Helvetica", "Times-Bold"]);
        assert_eq!(resources.opacities, [0.08]);
        assert!(!resources.image);
    }

    #[test]
    fn every_command_is_isolated() {
        let (fonts, commands) = compose_default(&jorge_jara());
        let stream = rendered(&commands, &fonts);
        let lines: Vec<&str> = stream.lines().collect();
        assert_eq!(lines.iter().filter(|&&line| line == "q").count(), commands.len());
        assert_eq!(lines.iter().filter(|&&line| line == "Q").count(), commands.len());
        assert_eq!(lines.first(), Some(&"q"));
        assert_eq!(lines.last(), Some(&"Q"));
    }

    #[test]
    fn text_is_shown_in_its_resource_font() {
        let (fonts, commands) = compose_default(&jorge_jara());
        let stream = rendered(&commands, &fonts);
        assert!(stream.contains("(JORGE JARA) Tj"));
        assert!(stream.contains("(10/05/2024) Tj"));
        assert!(stream.contains("/F0 16 Tf"));
        assert!(stream.contains("/F2 10 Tf"));
    }

    #[test]
    fn watermark_rotates_inside_its_own_state() {
        let (fonts, commands) = compose_default(&jorge_jara());
        let stream = rendered(&commands[commands.len() - 1..], &fonts);
        let lines: Vec<&str> = stream.lines().collect();
        assert_eq!(lines[0], "q");
        assert_eq!(lines[1], "/GS0 gs");
        assert!(lines[2].ends_with(" cm"));
        assert_eq!(lines.last(), Some(&"Q"));
    }
}
