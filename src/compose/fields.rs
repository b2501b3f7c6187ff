use super::Context;
use crate::command::DrawCommand;
use crate::config::{FieldLayout, FontRole};
use crate::units::Pt;

/// How many dots fit in what is left of a slot once the value is drawn.
///
/// Values wider than their slot leave no room and get no dots; the value
/// itself is still drawn in full and simply runs past the slot.
pub fn filler_count(available_width: Pt, measured_width: Pt, per_dot_advance: Pt) -> usize {
    if per_dot_advance <= Pt(0.0) || measured_width >= available_width {
        return 0;
    }
    let dots = ((available_width - measured_width) / per_dot_advance).floor();
    if dots.is_finite() {
        dots as usize
    } else {
        0
    }
}

/// A label followed on the same baseline by its value, plus the value's
/// filler when the field has one
pub(super) fn labelled_value(
    cx: &Context,
    layout: &FieldLayout,
    label: &str,
    value: &str,
) -> Vec<DrawCommand> {
    let colours = &cx.config.colors;
    let baseline = cx.config.from_top(layout.top);

    let label_font = cx.font(FontRole::Title);
    let label_width = cx.width_of_text(label_font, label, layout.label_size);
    let value_x = layout.x + label_width + layout.gap;

    let value_font = cx.font(layout.value_font);
    let value_width = cx.width_of_text(value_font, value, layout.value_size);

    let mut commands = vec![
        DrawCommand::Text(cx.run(
            label,
            FontRole::Title,
            layout.label_size,
            colours.secondary,
            (layout.x, baseline),
        )),
        DrawCommand::Text(cx.run(
            value,
            layout.value_font,
            layout.value_size,
            colours.accent,
            (value_x, baseline),
        )),
    ];

    if let Some(filler) = &layout.filler {
        let count = filler_count(filler.available_width, value_width, filler.per_dot_advance);
        log::debug!(
            "{} filler: value {} of {}, {} dots",
            label,
            value_width,
            filler.available_width,
            count
        );
        if count > 0 {
            commands.push(DrawCommand::Text(cx.run(
                ".".repeat(count),
                FontRole::Body,
                filler.size,
                colours.secondary,
                (value_x + value_width, baseline - filler.drop),
            )));
        }
    }

    commands
}

/// Full name, national id and the free-text reason
pub(super) fn patient_block(cx: &Context) -> Vec<DrawCommand> {
    let fields = &cx.config.fields;
    let labels = &cx.config.labels;
    let data = cx.data;

    let mut commands = labelled_value(cx, &fields.full_name, &labels.full_name, &data.full_name());
    commands.extend(labelled_value(
        cx,
        &fields.national_id,
        &labels.national_id,
        &data.national_id,
    ));
    commands.extend(labelled_value(cx, &fields.reason, &labels.reason, &data.free_text));
    commands
}

/// Rest hours and diagnostic code
pub(super) fn medical_block(cx: &Context) -> Vec<DrawCommand> {
    let fields = &cx.config.fields;
    let labels = &cx.config.labels;

    let hours = format!("{} {}", cx.data.rest_hours, labels.hours_suffix);
    let mut commands = labelled_value(cx, &fields.rest_hours, &labels.rest_hours, &hours);
    commands.extend(labelled_value(
        cx,
        &fields.diagnosis,
        &labels.diagnosis,
        &cx.data.diagnostic_code,
    ));
    commands
}
