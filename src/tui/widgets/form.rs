//! Reusable form widget for text input screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::i18n::{Locale, Text, tr, validation_message};
use crate::model::ValidationError;

/// Which characters a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Any printable character.
    #[default]
    Text,
    /// Signed decimal number: digits, one `.`, leading `-`.
    Decimal,
}

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Label shown in the field border.
    pub label: Text,
    /// Current text value.
    pub value: String,
    /// Validation error, if any.
    pub error: Option<ValidationError>,
    /// Whether the field must be non-blank on submit.
    pub required: bool,
    pub kind: FieldKind,
}

impl FormField {
    /// Creates a new free-text field.
    pub fn new(label: Text, required: bool) -> Self {
        Self {
            label,
            value: String::new(),
            error: None,
            required,
            kind: FieldKind::Text,
        }
    }

    /// Creates a new decimal field.
    pub fn decimal(label: Text, required: bool) -> Self {
        Self {
            kind: FieldKind::Decimal,
            ..Self::new(label, required)
        }
    }

    fn accepts(&self, ch: char) -> bool {
        match self.kind {
            FieldKind::Text => !ch.is_control(),
            FieldKind::Decimal => match ch {
                '0'..='9' => true,
                '.' => !self.value.contains('.'),
                '-' => self.value.is_empty(),
                _ => false,
            },
        }
    }
}

/// A multi-field text form with focus management.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form with the given fields. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Inserts a character at the end of the focused field, if the field accepts it.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.accepts(ch)
        {
            field.value.push(ch);
        }
    }

    /// Deletes the last character from the focused field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Replaces the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Sets an error on a field by index.
    pub fn set_error(&mut self, index: usize, error: ValidationError) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the value of the field at `index`, or an empty string if out of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Returns the error on the field at `index`.
    pub fn error(&self, index: usize) -> Option<&ValidationError> {
        self.fields.get(index).and_then(|f| f.error.as_ref())
    }

    /// Resets all field values and errors.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
        self.focus = 0;
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Height of one form row, including borders.
pub const ROW_HEIGHT: u16 = 3;

/// Renders a form within the given area.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, locale: Locale, frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let is_focused = i == form.focus;

        let border_color = if field.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = tr(locale, field.label);
        let label = if field.required {
            format!("{label} *")
        } else {
            label.to_string()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::raw(&field.value)];
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        // Error overlaps the bottom border of its row
        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(
                validation_message(locale, err),
                Style::default().fg(Color::Red),
            ));
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + ROW_HEIGHT.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_form() -> Form {
        Form::new(vec![
            FormField::new(Text::FieldReason, true),
            FormField::new(Text::FieldDestination, true),
            FormField::decimal(Text::FieldLatitude, false),
        ])
    }

    // --- Focus management ---

    #[test]
    fn focus_starts_at_zero() {
        let form = make_form();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_next_wraps() {
        let mut form = make_form();
        form.focus_next();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_prev_wraps() {
        let mut form = make_form();
        form.focus_prev();
        assert_eq!(form.focus(), 2);
    }

    #[test]
    fn focus_next_empty_form_is_noop() {
        let mut form = Form::new(vec![]);
        form.focus_next();
        form.focus_prev();
        assert_eq!(form.focus(), 0);
    }

    // --- Character insert/delete ---

    #[test]
    fn insert_char_appends_to_focused() {
        let mut form = make_form();
        form.insert_char('b');
        form.insert_char('y');
        assert_eq!(form.value(0), "by");
        assert_eq!(form.value(1), "");
    }

    #[test]
    fn text_field_accepts_unicode() {
        let mut form = make_form();
        for ch in "Чорсу".chars() {
            form.insert_char(ch);
        }
        assert_eq!(form.value(0), "Чорсу");
    }

    #[test]
    fn decimal_field_filters_input() {
        let mut form = make_form();
        form.focus_prev();
        for ch in "-4a1.2.9-".chars() {
            form.insert_char(ch);
        }
        assert_eq!(form.value(2), "-41.29");
    }

    #[test]
    fn delete_char_removes_last() {
        let mut form = make_form();
        form.insert_char('A');
        form.insert_char('B');
        form.delete_char();
        assert_eq!(form.value(0), "A");
    }

    #[test]
    fn delete_char_on_empty_is_noop() {
        let mut form = make_form();
        form.delete_char();
        assert_eq!(form.value(0), "");
    }

    #[test]
    fn set_value_replaces() {
        let mut form = make_form();
        form.set_value(1, "Depot");
        assert_eq!(form.value(1), "Depot");
    }

    // --- Error management ---

    #[test]
    fn set_error_on_field() {
        let mut form = make_form();
        form.set_error(0, ValidationError::Blank);
        assert!(form.has_errors());
        assert_eq!(form.error(0), Some(&ValidationError::Blank));
    }

    #[test]
    fn clear_errors_removes_all() {
        let mut form = make_form();
        form.set_error(0, ValidationError::Blank);
        form.set_error(2, ValidationError::NotANumber("x".into()));
        form.clear_errors();
        assert!(!form.has_errors());
    }

    #[test]
    fn set_error_out_of_bounds_is_noop() {
        let mut form = make_form();
        form.set_error(99, ValidationError::Blank);
        assert!(!form.has_errors());
    }

    #[test]
    fn value_out_of_bounds_returns_empty() {
        let form = make_form();
        assert_eq!(form.value(99), "");
    }

    #[test]
    fn reset_clears_values_errors_and_focus() {
        let mut form = make_form();
        form.insert_char('X');
        form.focus_next();
        form.set_error(0, ValidationError::Blank);
        form.reset();
        assert_eq!(form.value(0), "");
        assert_eq!(form.focus(), 0);
        assert!(!form.has_errors());
    }

    #[test]
    fn field_required_flags() {
        let form = make_form();
        assert!(form.fields()[0].required);
        assert!(!form.fields()[2].required);
        assert_eq!(form.fields()[2].kind, FieldKind::Decimal);
    }
}
