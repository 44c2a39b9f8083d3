//! Assessment screen: clinical parameter form and analysis results.
//!
//! The result column shows exactly one of three views, chosen from the
//! controller's `AnalysisState`: an idle placeholder, a loading gauge, or
//! the result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::AssessmentController;
use crate::domain::{AnalysisState, Field, PredictionResult, RiskLevel};
use crate::tui::styles::ClinicTheme;

/// View-local form state (focus only; values live in the controller).
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub selected: usize,
}

impl FormView {
    #[must_use]
    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected % Field::ALL.len()]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % Field::ALL.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = Field::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

/// Render the assessment screen.
pub fn render_assessment(f: &mut Frame, area: Rect, view: &FormView, controller: &AssessmentController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form | Results
            Constraint::Length(3), // Footer / notice
        ])
        .split(area);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_form(f, columns[0], view, controller);
    render_results(f, columns[1], controller);
    render_footer(f, chunks[2], controller);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("AI-Powered Liver Analysis", ClinicTheme::title()),
        Span::styled(
            " │ Enter the patient's clinical parameters",
            ClinicTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, view: &FormView, controller: &AssessmentController) {
    let block = Block::default()
        .title(Span::styled(" Clinical Parameters ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Field::ALL.len().div_ceil(2);
    let constraints: Vec<Constraint> = (0..rows)
        .map(|_| Constraint::Length(3))
        .chain([Constraint::Length(3), Constraint::Min(0)])
        .collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let selected = view.selected_field();
    for (row, pair) in Field::ALL.chunks(2).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row_areas[row]);
        for (col, &field) in pair.iter().enumerate() {
            render_field(f, cells[col], field, controller.inputs().get(field), field == selected);
        }
    }

    render_submit_button(f, row_areas[rows], controller.can_submit());
}

fn field_title(field: Field) -> String {
    let marker = if field.is_required() { " *" } else { "" };
    match field.unit() {
        Some(unit) => format!(" {} ({unit}){marker} ", field.label()),
        None => format!(" {}{marker} ", field.label()),
    }
}

fn render_field(f: &mut Frame, area: Rect, field: Field, value: &str, is_selected: bool) {
    let (border_style, title_style) = if is_selected {
        (ClinicTheme::border_focused(), ClinicTheme::focused())
    } else {
        (ClinicTheme::border(), ClinicTheme::text_secondary())
    };

    let value_display = match (field, value.is_empty()) {
        (_, true) => Span::styled(field.hint(), ClinicTheme::text_muted()),
        (Field::Gender, false) => Span::styled(format!("< {value} >"), ClinicTheme::text()),
        (_, false) => Span::styled(value.to_string(), ClinicTheme::text()),
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if is_selected {
            Span::styled("▌", ClinicTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(
        Block::default()
            .title(Span::styled(field_title(field), title_style))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(content, area);
}

fn render_submit_button(f: &mut Frame, area: Rect, enabled: bool) {
    let (label, style) = if enabled {
        (" [Enter] Analyze with AI ", ClinicTheme::button())
    } else {
        (" Analyzing... ", ClinicTheme::button_disabled())
    };

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    f.render_widget(button, area);
}

fn render_results(f: &mut Frame, area: Rect, controller: &AssessmentController) {
    let block = Block::default()
        .title(Span::styled(" AI Analysis Results ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    match controller.state() {
        AnalysisState::Idle => render_idle(f, inner),
        AnalysisState::Running { .. } => {
            render_loading(f, inner, controller.progress().unwrap_or(0.0))
        }
        AnalysisState::Completed(result) => render_result(f, inner, result),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Ready for Analysis", ClinicTheme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill out the form and press Enter to get your prediction",
            ClinicTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(content, area);
}

fn render_loading(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled("AI Analysis in Progress", ClinicTheme::title())),
        Line::from(Span::styled(
            "Processing clinical parameters...",
            ClinicTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    let percent = (progress * 100.0).round().clamp(0.0, 100.0) as u16;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ClinicTheme::border()),
        )
        .gauge_style(ClinicTheme::progress())
        .percent(percent)
        .label(format!("{percent}%"));
    f.render_widget(gauge, chunks[1]);
}

fn render_result(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk
            Constraint::Length(3), // Confidence
            Constraint::Min(5),    // Recommendations
            Constraint::Length(4), // Disclaimer
        ])
        .margin(1)
        .split(area);

    let risk_style = ClinicTheme::risk_level(result.risk());
    let risk_icon = match result.risk() {
        RiskLevel::Low => "OK",
        RiskLevel::Moderate | RiskLevel::High => "!",
    };

    let risk = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{risk_icon} {} Risk", result.risk()),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(result.risk().description(), ClinicTheme::text_secondary())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk, chunks[0]);

    let confidence = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Confidence ", ClinicTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(ClinicTheme::border()),
        )
        .gauge_style(risk_style)
        .percent(u16::from(result.confidence()))
        .label(format!("Confidence: {}%", result.confidence()));
    f.render_widget(confidence, chunks[1]);

    let mut lines = vec![Line::from(Span::styled(
        "Clinical Recommendations:",
        ClinicTheme::title(),
    ))];
    lines.extend(result.recommendations().iter().enumerate().map(|(i, rec)| {
        Line::from(vec![
            Span::styled(format!(" {}. ", i + 1), ClinicTheme::key_hint()),
            Span::styled(rec.clone(), ClinicTheme::text()),
        ])
    }));
    let recommendations = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(recommendations, chunks[2]);

    let disclaimer = Paragraph::new(Line::from(vec![
        Span::styled("Disclaimer: ", ClinicTheme::subtitle()),
        Span::styled(
            "This AI prediction is for educational purposes and should not replace professional \
             medical diagnosis or treatment. Always consult with qualified healthcare professionals.",
            ClinicTheme::text_muted(),
        ),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );
    f.render_widget(disclaimer, chunks[3]);
}

fn render_footer(f: &mut Frame, area: Rect, controller: &AssessmentController) {
    let content = match controller.notice() {
        Some(notice) => Line::from(vec![
            Span::styled("● ", ClinicTheme::notice(notice.kind)),
            Span::styled(notice.message.clone(), ClinicTheme::notice(notice.kind)),
            Span::styled("  [X] ", ClinicTheme::key_hint()),
            Span::styled("Dismiss", ClinicTheme::key_desc()),
        ]),
        None => Line::from(vec![
            Span::styled("[↑↓] ", ClinicTheme::key_hint()),
            Span::styled("Navigate ", ClinicTheme::key_desc()),
            Span::styled("[←→] ", ClinicTheme::key_hint()),
            Span::styled("Gender ", ClinicTheme::key_desc()),
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Analyze ", ClinicTheme::key_desc()),
            Span::styled("[S] ", ClinicTheme::key_hint()),
            Span::styled("Sample ", ClinicTheme::key_desc()),
            Span::styled("[N] ", ClinicTheme::key_hint()),
            Span::styled("New ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Back", ClinicTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(footer, area);
}
