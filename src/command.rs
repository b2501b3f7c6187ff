//! The drawing vocabulary shared by the compositor and the document writer.
//!
//! Each command carries every attribute it needs (font, size, colour,
//! position) so that no command depends on state left behind by another.

use crate::colour::Colour;
use crate::fonts::FontHandle;
use crate::rect::Rect;
use crate::units::Pt;

/// A font and the size it is drawn at
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: FontHandle,
    pub size: Pt,
}

/// A single run of text drawn from a baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct TextRun {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// Stroke settings for outlines and lines
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Stroke {
    pub colour: Colour,
    pub width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum DrawCommand {
    Rectangle {
        rect: Rect,
        fill: Option<Colour>,
        stroke: Option<Stroke>,
    },
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        stroke: Stroke,
    },
    Text(TextRun),
    /// The document's single image, scaled into `position`
    Image { position: Rect },
    /// Text rotated counter-clockwise about `centre`. The run's coordinates
    /// are its baseline origin relative to `centre`, in the rotated frame.
    RotatedText {
        run: TextRun,
        centre: (Pt, Pt),
        angle_degrees: f32,
        opacity: f32,
    },
}

impl DrawCommand {
    pub fn text_run(&self) -> Option<&TextRun> {
        match self {
            DrawCommand::Text(run) | DrawCommand::RotatedText { run, .. } => Some(run),
            _ => None,
        }
    }
}
