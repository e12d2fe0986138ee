use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use frontdoor_core::{Field, LoginForm, Route};

use crate::app::{App, AppState, LoginFocus};

use super::styles;

/// Width of the login dialog
const DIALOG_WIDTH: u16 = 52;

/// Visible width of a text field
const FIELD_WIDTH: usize = 28;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    if let AppState::Viewing(route) = app.state {
        render_page(frame, app, route, chunks[1]);
    }
    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::LoggingIn) {
        if let Some(ref form) = app.form {
            render_login_overlay(frame, app, form);
        }
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(Span::styled("  frontdoor", styles::title_style())))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.state {
        AppState::LoggingIn => &[("Tab", "next"), ("Enter", "select"), ("Esc", "quit")],
        AppState::Viewing(Route::Register) => &[("Esc", "back to login"), ("q", "quit")],
        AppState::Viewing(_) => &[("l", "log out"), ("q", "quit")],
        AppState::Quitting => &[],
    };

    let mut spans = vec![Span::raw(" ")];
    if let Some(ref message) = app.status_message {
        spans.push(Span::styled(message.clone(), styles::success_style()));
        spans.push(Span::raw("  "));
    }
    for (key, desc) in hints {
        spans.push(Span::styled(format!("[{}]", key), styles::help_key_style()));
        spans.push(Span::raw(format!(" {}  ", desc)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Login screen
// ============================================================================

fn text_field<'a>(label: &'a str, shown: String, focused: bool) -> Line<'a> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::input_style()
    };
    let cursor = if focused { "▌" } else { "" };
    // Show the tail of long values so the cursor stays visible
    let tail: String = {
        let count = shown.chars().count();
        shown.chars().skip(count.saturating_sub(FIELD_WIDTH)).collect()
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<10}[", label), styles::muted_style()),
        Span::styled(format!("{:<width$}{}", tail, cursor, width = FIELD_WIDTH), style),
        Span::styled("]", styles::muted_style()),
    ])
}

fn field_error<'a>(form: &LoginForm, field: Field) -> Option<Line<'a>> {
    form.state().visible_error(field).map(|message| {
        Line::from(Span::styled(
            format!("            {}", message),
            styles::error_style(),
        ))
    })
}

fn button<'a>(label: &'a str, focused: bool, enabled: bool) -> Line<'a> {
    let style = if !enabled {
        styles::disabled_style()
    } else if focused {
        styles::selected_style()
    } else {
        styles::input_style()
    };
    let text = if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    Line::from(vec![
        Span::raw("  ["),
        Span::styled(text, style),
        Span::raw("]"),
    ])
}

fn render_login_overlay(frame: &mut Frame, app: &App, form: &LoginForm) {
    let state = form.state();
    let mut lines = vec![
        Line::from(Span::styled("  Sign in", styles::title_style())),
        Line::from(""),
    ];

    lines.push(text_field(
        "Email",
        state.value(Field::Email).to_string(),
        app.login_focus == LoginFocus::Email,
    ));
    lines.extend(field_error(form, Field::Email));

    let masked = "*".repeat(state.value(Field::Password).chars().count());
    lines.push(text_field(
        "Password",
        masked,
        app.login_focus == LoginFocus::Password,
    ));
    lines.extend(field_error(form, Field::Password));

    lines.push(Line::from(""));
    let submit_label = if state.is_loading() { "Signing in..." } else { "Login" };
    lines.push(button(
        submit_label,
        app.login_focus == LoginFocus::Button,
        form.can_submit(),
    ));
    lines.push(button(
        "Continue as guest",
        app.login_focus == LoginFocus::Guest,
        true,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  No account? ", styles::muted_style()),
        Span::styled("Register", styles::link_style(app.login_focus == LoginFocus::Register)),
    ]));

    if let Some(notice) = state.notice() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", notice),
            styles::error_style(),
        )));
    }

    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(DIALOG_WIDTH, height, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Routed pages
// ============================================================================

fn render_page(frame: &mut Frame, app: &App, route: Route, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(format!("  {}", route.title()), styles::title_style())),
        Line::from(Span::styled(format!("  {}", route.path()), styles::muted_style())),
        Line::from(""),
    ];

    match route {
        Route::Landing | Route::GuestEntry => {
            let who = app
                .session()
                .map(|s| s.display_name().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            lines.push(Line::from(vec![
                Span::raw("  Signed in as "),
                Span::styled(who, styles::success_style()),
            ]));
        }
        Route::Register => {
            lines.push(Line::from(
                "  Registration is handled outside this terminal client.",
            ));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
