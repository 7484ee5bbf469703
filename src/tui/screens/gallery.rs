//! Gallery screen — list of guide images with a zoom/pan viewer.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::i18n::{Locale, Text, tr};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::image_viewer::{ImageViewer, draw_image_viewer};

/// Columns/rows moved per arrow key while viewing.
const PAN_STEP: (i32, i32) = (2, 1);

/// State for the gallery screen.
#[derive(Debug, Clone)]
pub struct GalleryState {
    images: Vec<String>,
    selected: Option<usize>,
    viewer: ImageViewer,
}

impl GalleryState {
    pub fn new(images: Vec<String>) -> Self {
        let selected = (!images.is_empty()).then_some(0);
        Self {
            images,
            selected,
            viewer: ImageViewer::new(),
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn viewer(&self) -> &ImageViewer {
        &self.viewer
    }

    /// Mouse drag pans and the wheel zooms while an image is open.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.viewer.is_open() {
            return;
        }
        let (x, y) = (i32::from(mouse.column), i32::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.viewer.drag_start(x, y),
            MouseEventKind::Drag(MouseButton::Left) => self.viewer.drag_move(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.viewer.drag_end(),
            MouseEventKind::ScrollUp => self.viewer.zoom_in(),
            MouseEventKind::ScrollDown => self.viewer.zoom_out(),
            _ => {}
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('+' | '=') => self.viewer.zoom_in(),
            KeyCode::Char('-') => self.viewer.zoom_out(),
            KeyCode::Char('0') => self.viewer.reset(),
            KeyCode::Left => self.viewer.pan_by(-PAN_STEP.0, 0),
            KeyCode::Right => self.viewer.pan_by(PAN_STEP.0, 0),
            KeyCode::Up => self.viewer.pan_by(0, -PAN_STEP.1),
            KeyCode::Down => self.viewer.pan_by(0, PAN_STEP.1),
            KeyCode::Esc | KeyCode::Char('q') => self.viewer.close(),
            _ => {}
        }
        Action::None
    }
}

impl ScreenState for GalleryState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.viewer.is_open() {
            return self.handle_viewer_key(key);
        }
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.map(|i| i.saturating_sub(1));
                Action::None
            }
            KeyCode::Down => {
                self.selected = self
                    .selected
                    .map(|i| (i + 1).min(self.images.len().saturating_sub(1)));
                Action::None
            }
            KeyCode::Enter => {
                if let Some(url) = self.selected.and_then(|i| self.images.get(i)) {
                    self.viewer.open(url.clone());
                }
                Action::None
            }
            KeyCode::Esc | KeyCode::Char('q') => Action::Back,
            _ => Action::None,
        }
    }
}

/// Renders the image list, or the viewer when an image is open.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_gallery(state: &GalleryState, locale: Locale, frame: &mut Frame, area: Rect) {
    if state.viewer().is_open() {
        draw_image_viewer(state.viewer(), locale, frame, area);
        return;
    }

    let block = Block::default()
        .title(format!(" {} ", tr(locale, Text::GalleryTitle)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [list_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    if state.images().is_empty() {
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), Line::from(tr(locale, Text::GalleryEmpty))])
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
    } else {
        let items: Vec<ListItem> = state
            .images()
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let style = if Some(i) == state.selected() {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{:>2}. {url}", i + 1)).style(style)
            })
            .collect();
        frame.render_widget(List::new(items), list_area);
    }

    frame.render_widget(
        Paragraph::new(tr(locale, Text::FooterGallery)).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn make_gallery() -> GalleryState {
        GalleryState::new(vec![
            "https://cdn.example.com/guide/1.png".into(),
            "https://cdn.example.com/guide/2.png".into(),
        ])
    }

    #[test]
    fn empty_gallery_has_no_selection() {
        let mut state = GalleryState::new(Vec::new());
        assert_eq!(state.selected(), None);
        state.handle_key(press(KeyCode::Down));
        state.handle_key(press(KeyCode::Enter));
        assert!(!state.viewer().is_open());
    }

    #[test]
    fn enter_opens_selected_image() {
        let mut state = make_gallery();
        state.handle_key(press(KeyCode::Down));
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(
            state.viewer().image(),
            Some("https://cdn.example.com/guide/2.png")
        );
        assert_eq!(state.viewer().scale(), 1.0);
    }

    #[test]
    fn selection_clamps_to_list() {
        let mut state = make_gallery();
        for _ in 0..5 {
            state.handle_key(press(KeyCode::Down));
        }
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn keys_zoom_and_pan_open_viewer() {
        let mut state = make_gallery();
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Char('+')));
        state.handle_key(press(KeyCode::Right));
        state.handle_key(press(KeyCode::Up));
        assert_eq!(state.viewer().scale(), 1.25);
        assert_eq!(state.viewer().offset(), (2, -1));

        state.handle_key(press(KeyCode::Char('0')));
        assert_eq!(state.viewer().scale(), 1.0);
        assert_eq!(state.viewer().offset(), (0, 0));
    }

    #[test]
    fn esc_closes_viewer_before_leaving() {
        let mut state = make_gallery();
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::None);
        assert!(!state.viewer().is_open());
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::Back);
    }

    #[test]
    fn mouse_drag_pans() {
        let mut state = make_gallery();
        state.handle_key(press(KeyCode::Enter));
        state.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        state.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 15, 8));
        state.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 15, 8));
        assert_eq!(state.viewer().offset(), (5, -2));
        assert!(!state.viewer().is_dragging());
    }

    #[test]
    fn wheel_zooms() {
        let mut state = make_gallery();
        state.handle_key(press(KeyCode::Enter));
        state.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(state.viewer().scale(), 0.75);
    }

    #[test]
    fn mouse_ignored_without_open_image() {
        let mut state = make_gallery();
        state.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(state.viewer().scale(), 1.0);
    }
}
