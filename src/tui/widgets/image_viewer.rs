//! Zoom/pan overlay for a single image.
//!
//! The terminal cannot show the picture itself, so the overlay draws a frame
//! sized by the zoom level and shifted by the pan offset, labelled with the
//! image URL.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::i18n::{Locale, Text, tr};

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 5.0;
pub const SCALE_STEP: f32 = 0.25;

/// Size of the image frame at scale 1, in cells.
const BASE_SIZE: (u16, u16) = (24, 8);

/// Zoom/pan state. Closed when no image is open.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageViewer {
    image: Option<String>,
    scale: f32,
    offset: (i32, i32),
    /// Pointer position minus offset at drag start.
    drag_anchor: Option<(i32, i32)>,
}

impl Default for ImageViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageViewer {
    pub fn new() -> Self {
        Self {
            image: None,
            scale: 1.0,
            offset: (0, 0),
            drag_anchor: None,
        }
    }

    /// Opens `url` with scale 1 and no pan.
    pub fn open(&mut self, url: impl Into<String>) {
        *self = Self {
            image: Some(url.into()),
            ..Self::new()
        };
    }

    /// Closes the overlay, discarding zoom and pan.
    pub fn close(&mut self) {
        *self = Self::new();
    }

    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    /// Changes the scale by `delta`, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn set_scale(&mut self, delta: f32) {
        self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(SCALE_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(-SCALE_STEP);
    }

    /// Resets zoom and pan, keeping the image open.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = (0, 0);
        self.drag_anchor = None;
    }

    /// Shifts the image by a fixed amount.
    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        self.offset = (self.offset.0 + dx, self.offset.1 + dy);
    }

    /// Records the pointer position where a drag begins.
    pub fn drag_start(&mut self, x: i32, y: i32) {
        if self.is_open() {
            self.drag_anchor = Some((x - self.offset.0, y - self.offset.1));
        }
    }

    /// Moves the image so it follows the pointer; ignored outside a drag.
    pub fn drag_move(&mut self, x: i32, y: i32) {
        if let Some((ax, ay)) = self.drag_anchor {
            self.offset = (x - ax, y - ay);
        }
    }

    pub fn drag_end(&mut self) {
        self.drag_anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }
}

/// Renders the overlay over `area`. Does nothing when closed.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_image_viewer(viewer: &ImageViewer, locale: Locale, frame: &mut Frame, area: Rect) {
    let Some(url) = viewer.image() else {
        return;
    };

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [canvas, status, footer] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let width = (f32::from(BASE_SIZE.0) * viewer.scale()).round() as i32;
    let height = (f32::from(BASE_SIZE.1) * viewer.scale()).round() as i32;
    let (dx, dy) = viewer.offset();
    let left = i32::from(canvas.x) + (i32::from(canvas.width) - width) / 2 + dx;
    let top = i32::from(canvas.y) + (i32::from(canvas.height) - height) / 2 + dy;
    if let Some(image_area) = clip(left, top, width, height, canvas) {
        let picture = Paragraph::new(url)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(picture, image_area);
    }

    let status_line = format!(
        "{}: {:.0}%   {}: ({dx}, {dy})",
        tr(locale, Text::ViewerZoom),
        viewer.scale() * 100.0,
        tr(locale, Text::ViewerOffset),
    );
    frame.render_widget(Paragraph::new(Line::from(status_line)), status);
    frame.render_widget(
        Paragraph::new(tr(locale, Text::FooterViewer)).style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}

/// Intersects a signed rectangle with `bounds`.
fn clip(left: i32, top: i32, width: i32, height: i32, bounds: Rect) -> Option<Rect> {
    let x0 = left.max(i32::from(bounds.x));
    let y0 = top.max(i32::from(bounds.y));
    let x1 = (left + width).min(i32::from(bounds.right()));
    let y1 = (top + height).min(i32::from(bounds.bottom()));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect {
        x: u16::try_from(x0).ok()?,
        y: u16::try_from(y0).ok()?,
        width: u16::try_from(x1 - x0).ok()?,
        height: u16::try_from(y1 - y0).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn starts_closed() {
        let viewer = ImageViewer::new();
        assert!(!viewer.is_open());
        assert_eq!(viewer.scale(), 1.0);
    }

    #[test]
    fn zoom_steps_by_quarter() {
        let mut viewer = ImageViewer::new();
        viewer.open("a.png");
        viewer.zoom_in();
        assert_eq!(viewer.scale(), 1.25);
        viewer.zoom_out();
        viewer.zoom_out();
        assert_eq!(viewer.scale(), 0.75);
    }

    #[test]
    fn zoom_clamps_at_bounds() {
        let mut viewer = ImageViewer::new();
        viewer.open("a.png");
        for _ in 0..40 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.scale(), MAX_SCALE);
        for _ in 0..40 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.scale(), MIN_SCALE);
    }

    #[test]
    fn drag_moves_relative_to_start_point() {
        let mut viewer = ImageViewer::new();
        viewer.open("a.png");
        viewer.drag_start(10, 5);
        viewer.drag_move(14, 3);
        assert_eq!(viewer.offset(), (4, -2));
        viewer.drag_end();
        assert!(!viewer.is_dragging());

        // a second drag continues from the current offset
        viewer.drag_start(0, 0);
        viewer.drag_move(1, 1);
        assert_eq!(viewer.offset(), (5, -1));
    }

    #[test]
    fn drag_move_without_start_is_ignored() {
        let mut viewer = ImageViewer::new();
        viewer.open("a.png");
        viewer.drag_move(30, 30);
        assert_eq!(viewer.offset(), (0, 0));
    }

    #[test]
    fn drag_on_closed_viewer_is_ignored() {
        let mut viewer = ImageViewer::new();
        viewer.drag_start(1, 1);
        assert!(!viewer.is_dragging());
    }

    #[test]
    fn close_discards_state() {
        let mut viewer = ImageViewer::new();
        viewer.open("a.png");
        viewer.zoom_in();
        viewer.pan_by(3, 3);
        viewer.close();
        assert_eq!(viewer, ImageViewer::new());
    }

    #[test]
    fn reset_keeps_image_open() {
        let mut viewer = ImageViewer::new();
        viewer.open("a.png");
        viewer.zoom_in();
        viewer.pan_by(-2, 7);
        viewer.reset();
        assert_eq!(viewer.image(), Some("a.png"));
        assert_eq!(viewer.scale(), 1.0);
        assert_eq!(viewer.offset(), (0, 0));
    }

    #[test]
    fn clip_inside_bounds() {
        let bounds = Rect::new(0, 0, 40, 20);
        assert_eq!(clip(5, 5, 10, 4, bounds), Some(Rect::new(5, 5, 10, 4)));
    }

    #[test]
    fn clip_partially_outside() {
        let bounds = Rect::new(0, 0, 40, 20);
        assert_eq!(clip(-5, 18, 10, 4, bounds), Some(Rect::new(0, 18, 5, 2)));
    }

    #[test]
    fn clip_fully_outside() {
        let bounds = Rect::new(0, 0, 40, 20);
        assert_eq!(clip(50, 5, 10, 4, bounds), None);
    }

    #[quickcheck]
    fn scale_never_leaves_bounds(steps: Vec<bool>) -> bool {
        let mut viewer = ImageViewer::new();
        viewer.open("a.png");
        steps.iter().all(|zoom_in| {
            if *zoom_in {
                viewer.zoom_in();
            } else {
                viewer.zoom_out();
            }
            (MIN_SCALE..=MAX_SCALE).contains(&viewer.scale())
        })
    }

    #[quickcheck]
    fn opening_resets_zoom_and_pan(steps: Vec<bool>, dx: i8, dy: i8) -> bool {
        let mut viewer = ImageViewer::new();
        viewer.open("first.png");
        for zoom_in in steps {
            if zoom_in {
                viewer.zoom_in();
            } else {
                viewer.zoom_out();
            }
        }
        viewer.pan_by(i32::from(dx), i32::from(dy));
        viewer.open("second.png");
        viewer.scale() == 1.0 && viewer.offset() == (0, 0) && viewer.image() == Some("second.png")
    }
}
