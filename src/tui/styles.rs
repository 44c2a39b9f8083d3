//! Colour palette and preset styles.
//!
//! Blue/teal gradient colours from the web page the demo mirrors, with
//! green/amber/red reserved for risk buckets.

use ratatui::style::{Color, Modifier, Style};

use crate::application::NoticeKind;
use crate::domain::RiskLevel;

/// Hepascope colour theme.
pub struct ClinicTheme;

impl ClinicTheme {
    pub const BLUE: Color = Color::Rgb(37, 99, 235); // #2563EB
    pub const BLUE_LIGHT: Color = Color::Rgb(96, 165, 250); // #60A5FA
    pub const TEAL: Color = Color::Rgb(13, 148, 136); // #0D9488
    pub const TEAL_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    pub const GREEN: Color = Color::Rgb(22, 163, 74); // #16A34A
    pub const AMBER: Color = Color::Rgb(217, 119, 6); // #D97706
    pub const RED: Color = Color::Rgb(220, 38, 38); // #DC2626

    pub const SLATE: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(203, 213, 225); // #CBD5E1
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    /// Gradient-highlighted word in the hero title.
    #[must_use]
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::TEAL_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::BLUE_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::GREEN)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::AMBER)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::RED)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SLATE)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::TEAL)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::TEAL_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::TEAL_LIGHT)
    }

    /// Submit button, enabled.
    #[must_use]
    pub fn button() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::BLUE)
            .add_modifier(Modifier::BOLD)
    }

    /// Submit button while an analysis is running.
    #[must_use]
    pub fn button_disabled() -> Style {
        Style::default().fg(Self::TEXT_MUTED).bg(Color::Rgb(30, 41, 59))
    }

    #[must_use]
    pub fn progress() -> Style {
        Style::default().fg(Self::BLUE)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::TEAL_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        match level {
            RiskLevel::Low => Self::success(),
            RiskLevel::Moderate => Self::warning(),
            RiskLevel::High => Self::danger(),
        }
    }

    #[must_use]
    pub fn notice(kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Success => Self::success(),
            NoticeKind::Error => Self::danger(),
        }
    }
}
