use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;
use rephrase_core::{AppViewModel, BackendHealth, OutputBoxView, Status};

use super::constants::*;
use super::layout;
use crate::platform::keymap::Focus;

pub fn render(frame: &mut Frame, view: &AppViewModel, focus: Focus) {
    let areas = layout::compute(frame.area(), view.outputs.len());

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                APP_TITLE,
                Style::new().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(APP_SUBTITLE, Style::new().fg(Color::DarkGray))),
        ]),
        areas.title,
    );
    frame.render_widget(Paragraph::new(toolbar_line(view)), areas.toolbar);
    render_input(frame, view, focus == Focus::Input, areas.input);

    for (idx, (output, area)) in view.outputs.iter().zip(&areas.outputs).enumerate() {
        render_output(frame, output, focus == Focus::Output(idx), *area);
    }

    frame.render_widget(Paragraph::new(status_line(view)), areas.status);
}

fn toolbar_line(view: &AppViewModel) -> Line<'static> {
    let mut spans = vec![button(view.submit_label, view.input_enabled)];
    if view.can_cancel {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "[Cancel Processing]",
            Style::new().fg(Color::Red),
        ));
    }
    spans.push(Span::raw(" "));
    spans.push(button("Clear All Styles", true));
    spans.push(Span::raw(" "));
    spans.push(button("Clear Input", true));
    spans.push(Span::raw(format!(
        "   {} chars ",
        format_with_commas(view.char_count as u64)
    )));

    let pill_style = match view.status {
        Status::Idle => Style::new().fg(Color::Black).bg(Color::Gray),
        Status::Processing => Style::new().fg(Color::Black).bg(Color::Yellow),
    };
    spans.push(Span::styled(format!(" {} ", view.status_label), pill_style));
    Line::from(spans)
}

fn button(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    Span::styled(format!("[{label}]"), style)
}

fn render_input(frame: &mut Frame, view: &AppViewModel, focused: bool, area: Rect) {
    let block = Block::bordered()
        .title(" Input ")
        .border_style(border_style(focused && view.input_enabled));

    let paragraph = if view.input.is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::new().fg(Color::DarkGray),
        ))
    } else {
        let style = if view.input_enabled {
            Style::new()
        } else {
            Style::new().fg(Color::DarkGray)
        };
        let paragraph = Paragraph::new(view.input.as_str())
            .style(style)
            .wrap(Wrap { trim: false });
        let offset = tail_offset(&paragraph, block.inner(area));
        paragraph.scroll((offset, 0))
    };
    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

fn render_output(frame: &mut Frame, output: &OutputBoxView, focused: bool, area: Rect) {
    let block = Block::bordered()
        .title(format!(" {} ", output.label))
        .border_style(border_style(focused));
    let paragraph = Paragraph::new(output.text.as_str()).wrap(Wrap { trim: false });
    let offset = tail_offset(&paragraph, block.inner(area));
    frame.render_widget(paragraph.block(block).scroll((offset, 0)), area);
}

fn status_line(view: &AppViewModel) -> Line<'static> {
    let (health, color) = match view.health {
        BackendHealth::Unknown => ("backend: checking", Color::DarkGray),
        BackendHealth::Reachable => ("backend: ok", Color::Green),
        BackendHealth::Unreachable => ("backend: unreachable", Color::Red),
    };
    Line::from(vec![
        Span::styled(health, Style::new().fg(color)),
        Span::raw(" | "),
        Span::styled(KEY_HINTS, Style::new().fg(Color::DarkGray)),
    ])
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new()
    }
}

/// Scroll offset that keeps the last wrapped lines visible inside `inner`.
/// `paragraph` must not have a block yet and must carry its final wrap mode.
fn tail_offset(paragraph: &Paragraph, inner: Rect) -> u16 {
    let wrapped = paragraph.line_count(inner.width.max(1));
    let overflow = wrapped.saturating_sub(usize::from(inner.height));
    u16::try_from(overflow).unwrap_or(u16::MAX)
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
