//! Overview screen: hero, highlights, methodology and model comparison.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::ClinicTheme;

/// Feature highlights under the hero text.
const HIGHLIGHTS: [(&str, &str); 3] = [
    (
        "AI-Powered Analysis",
        "Advanced machine learning algorithms for accurate prediction and early detection",
    ),
    (
        "High Accuracy",
        "Trained on comprehensive datasets with rigorous validation and testing",
    ),
    (
        "Clinical Support",
        "Designed to assist healthcare professionals in making informed decisions",
    ),
];

const METHODOLOGY: [(&str, &str); 4] = [
    (
        "Data Collection & Preparation",
        "Comprehensive dataset collection with thorough data preparation and cleaning procedures",
    ),
    (
        "Exploratory Data Analysis",
        "Descriptive statistical analysis and visual exploration of liver cirrhosis patterns",
    ),
    (
        "Model Building",
        "Training multiple algorithms including Decision Trees, Random Forest, KNN, and XGBoost",
    ),
    (
        "Performance Testing",
        "Rigorous evaluation with multiple metrics and hyperparameter tuning optimization",
    ),
];

/// (name, accuracy, description)
const MODELS: [(&str, &str, &str); 4] = [
    ("Decision Tree", "82%", "Interpretable tree-based classification"),
    ("Random Forest", "89%", "Ensemble method with multiple trees"),
    ("K-Nearest Neighbors", "76%", "Instance-based learning algorithm"),
    ("XGBoost", "93%", "Gradient boosting for optimal performance"),
];

const IMPACT: [&str; 4] = [
    "Improved patient outcomes through early detection",
    "Optimization of healthcare resources",
    "Advancement in computational hepatology",
    "AI-driven clinical decision support",
];

pub fn render_overview(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Hero
            Constraint::Length(5), // Highlights
            Constraint::Min(0),    // Methodology + models
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_hero(f, chunks[0]);
    render_highlights(f, chunks[1]);
    render_project_info(f, chunks[2]);
    render_key_hints(f, chunks[3]);
}

fn render_hero(f: &mut Frame, area: Rect) {
    let hero = Paragraph::new(vec![
        Line::from(Span::styled("Revolutionizing Liver Care", ClinicTheme::subtitle())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Predicting Liver ", ClinicTheme::title()),
            Span::styled("Cirrhosis", ClinicTheme::accent()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Using Advanced Machine Learning Techniques for early detection and prognosis of liver cirrhosis, \
             enabling healthcare professionals to initiate timely interventions and personalized treatment strategies.",
            ClinicTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(hero, area);
}

fn render_highlights(f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (i, (title, body)) in HIGHLIGHTS.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(*body, ClinicTheme::text_muted())))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(Span::styled(format!(" {title} "), ClinicTheme::subtitle()))
                    .borders(Borders::ALL)
                    .border_style(ClinicTheme::border()),
            );
        f.render_widget(card, columns[i]);
    }
}

fn render_project_info(f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut steps = Vec::with_capacity(METHODOLOGY.len() * 2);
    for (i, (title, description)) in METHODOLOGY.iter().enumerate() {
        steps.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), ClinicTheme::key_hint()),
            Span::styled(*title, ClinicTheme::text()),
        ]));
        steps.push(Line::from(Span::styled(
            format!("   {description}"),
            ClinicTheme::text_muted(),
        )));
    }

    let methodology = Paragraph::new(steps).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" Project Methodology ", ClinicTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(ClinicTheme::border()),
    );
    f.render_widget(methodology, columns[0]);

    let mut models: Vec<Line> = MODELS
        .iter()
        .map(|(name, accuracy, description)| {
            Line::from(vec![
                Span::styled(format!("{accuracy:>4} "), ClinicTheme::subtitle()),
                Span::styled(format!("{name:<20}"), ClinicTheme::text()),
                Span::styled(*description, ClinicTheme::text_muted()),
            ])
        })
        .collect();
    models.push(Line::from(""));
    models.push(Line::from(Span::styled("Project Impact", ClinicTheme::title())));
    models.extend(IMPACT.iter().map(|item| {
        Line::from(vec![
            Span::styled("  + ", ClinicTheme::key_hint()),
            Span::styled(*item, ClinicTheme::text_secondary()),
        ])
    }));

    let comparison = Paragraph::new(models).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" Machine Learning Models ", ClinicTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(ClinicTheme::border()),
    );
    f.render_widget(comparison, columns[1]);
}

fn render_key_hints(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", ClinicTheme::key_hint()),
        Span::styled("Start Prediction ", ClinicTheme::key_desc()),
        Span::styled("[Q] ", ClinicTheme::key_hint()),
        Span::styled("Quit", ClinicTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(hints, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(width: u16, height: u16) -> String {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("Should create terminal");
        terminal
            .draw(|f| {
                let area = f.area();
                render_overview(f, area);
            })
            .expect("Should draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_overview_draws_hero_and_models() {
        let text = screen_text(140, 48);
        assert!(text.contains("Predicting Liver Cirrhosis"));
        assert!(text.contains(" 93% XGBoost"));
        assert!(text.contains(" 82% Decision Tree"));
        assert!(text.contains("Start Prediction"));
    }

    #[test]
    fn test_overview_survives_tiny_terminal() {
        let text = screen_text(20, 6);
        assert_eq!(text.chars().count(), 20 * 6);
    }
}
