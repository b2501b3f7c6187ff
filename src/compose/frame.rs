use super::Context;
use crate::colour::colours;
use crate::command::{DrawCommand, Stroke};
use crate::config::FontRole;
use crate::rect::Rect;
use crate::units::Pt;

/// Rules stop this far short of the borders on either side
const RULE_INSET: Pt = Pt(10.0);

/// White page, the heavy left border, the thin top, right and bottom borders,
/// and the rules under the header and above the footer
pub(super) fn background(cx: &Context) -> Vec<DrawCommand> {
    let config = cx.config;
    let frame = &config.frame;
    let margins = &config.margins;
    let primary = config.colors.primary;

    let left = margins.left;
    let right = config.width - margins.right;
    let top = config.from_top(margins.top);
    let bottom = margins.bottom;

    let border = Stroke {
        colour: primary,
        width: frame.border_width,
    };
    let rule = Stroke {
        colour: config.colors.secondary,
        width: frame.rule_width,
    };
    let rule_start = left + frame.left_border_width + RULE_INSET;
    let rule_end = right - RULE_INSET;
    let header_rule = config.from_top(frame.header_rule_top);
    let footer_rule = config.from_top(frame.footer_rule_top);

    vec![
        DrawCommand::Rectangle {
            rect: Rect::from_origin(Pt(0.0), Pt(0.0), config.width, config.height),
            fill: Some(colours::WHITE),
            stroke: None,
        },
        DrawCommand::Rectangle {
            rect: Rect {
                x1: left,
                y1: bottom,
                x2: left + frame.left_border_width,
                y2: top,
            },
            fill: Some(primary),
            stroke: None,
        },
        DrawCommand::Line {
            from: (left, top),
            to: (right, top),
            stroke: border,
        },
        DrawCommand::Line {
            from: (right, top),
            to: (right, bottom),
            stroke: border,
        },
        DrawCommand::Line {
            from: (left, bottom),
            to: (right, bottom),
            stroke: border,
        },
        DrawCommand::Line {
            from: (rule_start, header_rule),
            to: (rule_end, header_rule),
            stroke: rule,
        },
        DrawCommand::Line {
            from: (rule_start, footer_rule),
            to: (rule_end, footer_rule),
            stroke: rule,
        },
    ]
}

/// Practitioner name, specialty and licence numbers, centred
pub(super) fn header(cx: &Context) -> Vec<DrawCommand> {
    let config = cx.config;
    let header = &config.header;
    let practitioner = &config.practitioner;
    let centre = config.centre_x();

    vec![
        DrawCommand::Text(cx.centred(
            practitioner.name.as_str(),
            FontRole::Title,
            header.name_size,
            config.colors.primary,
            centre,
            config.from_top(header.name_top),
        )),
        DrawCommand::Text(cx.centred(
            practitioner.specialty.as_str(),
            FontRole::Body,
            header.specialty_size,
            config.colors.secondary,
            centre,
            config.from_top(header.specialty_top),
        )),
        DrawCommand::Text(cx.centred(
            practitioner.license.as_str(),
            FontRole::Body,
            header.license_size,
            config.colors.secondary,
            centre,
            config.from_top(header.license_top),
        )),
    ]
}
