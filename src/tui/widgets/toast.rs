//! Toast widget: one transient success or error line.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A notification shown at the bottom of the screen until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    expires_at: Instant,
}

impl Toast {
    pub fn success(text: impl Into<String>, now: Instant) -> Self {
        Self::new(ToastKind::Success, text.into(), now)
    }

    pub fn error(text: impl Into<String>, now: Instant) -> Self {
        Self::new(ToastKind::Error, text.into(), now)
    }

    fn new(kind: ToastKind, text: String, now: Instant) -> Self {
        Self {
            kind,
            text,
            expires_at: now + TOAST_TTL,
        }
    }

    /// Returns `true` once the toast should no longer be shown.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Renders a one-line toast.
///
/// - Success: `✓ Stop reason saved` in Green
/// - Error:   `✗ bad enum` in Red, bold
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_toast(toast: &Toast, frame: &mut Frame, area: Rect) {
    let (marker, style) = match toast.kind {
        ToastKind::Success => ("✓ ", Style::default().fg(Color::Green)),
        ToastKind::Error => (
            "✗ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };
    let line = Line::from(vec![
        Span::styled(marker, style),
        Span::styled(toast.text.as_str(), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render_toast(toast: &Toast, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_toast(toast, frame, frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn expires_after_ttl() {
        let now = Instant::now();
        let toast = Toast::success("saved", now);
        assert!(!toast.is_expired(now));
        assert!(!toast.is_expired(now + TOAST_TTL - Duration::from_millis(1)));
        assert!(toast.is_expired(now + TOAST_TTL));
    }

    #[test]
    fn renders_success_text() {
        let toast = Toast::success("Stop reason saved", Instant::now());
        let output = render_toast(&toast, 40);
        assert!(output.contains("Stop reason saved"));
        assert!(output.contains('✓'));
    }

    #[test]
    fn renders_error_text() {
        let toast = Toast::error("bad enum", Instant::now());
        let output = render_toast(&toast, 40);
        assert!(output.contains("bad enum"));
        assert!(output.contains('✗'));
    }
}
