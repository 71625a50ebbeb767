//! A [`Surface`] that draws the control with ratatui.
//!
//! The trigger takes one row (plus borders if a block is set). While the list
//! is shown it is drawn as a bordered overlay directly below the trigger.
//! Each render remembers where things landed so crossterm mouse positions can
//! be hit-tested against the last frame.

use picklist_core::{Focus, Hit, Position, Surface};
use ratatui::layout::{Position as CellPosition, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const ARROW_CLOSED: &str = " ▸";
const ARROW_TURNED: &str = " ▾";
const SELECTED_MARK: &str = "✓ ";
const UNSELECTED_MARK: &str = "  ";
const ELLIPSIS: &str = "...";

/// Visual style for [`TerminalSurface`].
#[derive(Debug, Clone)]
pub struct SurfaceStyle {
    /// Trigger text once an option is chosen.
    pub trigger: Style,
    /// Trigger text while showing the placeholder.
    pub placeholder: Style,
    /// Added to the trigger while the list is open.
    pub active: Style,
    /// Added to whichever element has keyboard focus.
    pub focused: Style,
    /// The arrow.
    pub arrow: Style,
    /// Unselected options.
    pub item: Style,
    /// The selected option.
    pub selected_item: Style,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            trigger: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            active: Style::default().fg(Color::Cyan),
            focused: Style::default().add_modifier(Modifier::REVERSED),
            arrow: Style::default().fg(Color::DarkGray),
            item: Style::default(),
            selected_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Areas from the most recent render.
#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    trigger: Rect,
    list: Rect,
    items: Rect,
    offset: usize,
}

/// Draws a select control into a ratatui [`Frame`].
///
/// # Example
///
/// ```rust,ignore
/// use picklist_widgets::terminal::TerminalSurface;
///
/// let select = Select::new(config, TerminalSurface::new(), &document, HostTarget::Body);
/// terminal.draw(|frame| select.surface().render(frame, area))?;
/// ```
#[derive(Debug, Default)]
pub struct TerminalSurface {
    labels: Vec<String>,
    placeholder: String,
    trigger_text: String,
    trigger_active: bool,
    arrow_turned: bool,
    list_shown: bool,
    expanded: bool,
    selected: Vec<bool>,
    focus: Option<Focus>,
    style: SurfaceStyle,
    block: Option<Block<'static>>,
    max_visible: Option<usize>,
    layout: Cell<Layout>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: SurfaceStyle) -> Self {
        self.style = style;
        self
    }

    /// Draw a block (border, title) around the trigger.
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Cap the number of option rows drawn at once.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = Some(max.max(1));
        self
    }

    /// Accessible expanded state, as last set by the controller.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Accessible selected state of item `index`.
    pub fn is_item_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Rows the control wants for the trigger alone.
    pub fn trigger_height(&self) -> u16 {
        if self.block.is_some() {
            3
        } else {
            1
        }
    }

    /// Draw into `area`. The list overlay extends below the trigger within
    /// `area` and is clipped to it.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let trigger = Rect {
            height: self.trigger_height().min(area.height),
            ..area
        };
        self.render_trigger(frame, trigger);

        let mut layout = Layout {
            trigger,
            ..Layout::default()
        };
        if self.list_shown && !self.labels.is_empty() {
            let below = area.y.saturating_add(trigger.height);
            let room = area.bottom().saturating_sub(below);
            let rows = self.max_visible.unwrap_or(usize::MAX).min(self.labels.len());
            let height = u16::try_from(rows)
                .unwrap_or(u16::MAX)
                .saturating_add(2)
                .min(room);
            let list = Rect::new(area.x, below, area.width, height);
            if list.height > 2 && list.width > 2 {
                layout.list = list;
                layout.items = Block::bordered().inner(list);
                layout.offset = self.scroll_offset(layout.items.height as usize);
                self.render_list(frame, layout);
            }
        }
        self.layout.set(layout);
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                frame.render_widget(block.clone(), area);
                inner
            }
            None => area,
        };

        let mut text_style = if self.trigger_text == self.placeholder {
            self.style.placeholder
        } else {
            self.style.trigger
        };
        if self.trigger_active {
            text_style = text_style.patch(self.style.active);
        }
        if self.focus == Some(Focus::Trigger) {
            text_style = text_style.patch(self.style.focused);
        }

        let arrow = if self.arrow_turned {
            ARROW_TURNED
        } else {
            ARROW_CLOSED
        };
        let room = (inner.width as usize).saturating_sub(arrow.width());
        let line = Line::from(vec![
            Span::styled(truncate(&self.trigger_text, room), text_style),
            Span::styled(arrow, self.style.arrow),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_list(&self, frame: &mut Frame, layout: Layout) {
        frame.render_widget(Clear, layout.list);
        frame.render_widget(Block::bordered(), layout.list);

        let rows = layout.items.height as usize;
        let room = (layout.items.width as usize).saturating_sub(SELECTED_MARK.width());
        for (row, (index, label)) in self
            .labels
            .iter()
            .enumerate()
            .skip(layout.offset)
            .take(rows)
            .enumerate()
        {
            let selected = self.is_item_selected(index);
            let mut style = if selected {
                self.style.selected_item
            } else {
                self.style.item
            };
            if self.focus == Some(Focus::Item(index)) {
                style = style.patch(self.style.focused);
            }
            let mark = if selected { SELECTED_MARK } else { UNSELECTED_MARK };
            let text = format!("{mark}{}", truncate(label, room));
            let area = Rect {
                y: layout.items.y + row as u16,
                height: 1,
                ..layout.items
            };
            frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
        }
    }

    /// First visible option so the focused one stays on screen.
    fn scroll_offset(&self, rows: usize) -> usize {
        match self.focus {
            Some(Focus::Item(index)) if rows > 0 && index >= rows => index + 1 - rows,
            _ => 0,
        }
    }
}

impl Surface for TerminalSurface {
    fn mount(&mut self, placeholder: &str, options: &[String]) {
        self.placeholder = placeholder.to_string();
        self.trigger_text = placeholder.to_string();
        self.labels = options.to_vec();
        self.selected = vec![false; options.len()];
    }

    fn item_count(&self) -> usize {
        self.labels.len()
    }

    fn item_label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    fn set_trigger_text(&mut self, text: &str) {
        self.trigger_text = text.to_string();
    }

    fn set_trigger_active(&mut self, active: bool) {
        self.trigger_active = active;
    }

    fn set_arrow_turned(&mut self, turned: bool) {
        self.arrow_turned = turned;
    }

    fn set_list_shown(&mut self, shown: bool) {
        self.list_shown = shown;
        if !shown {
            let layout = self.layout.get();
            self.layout.set(Layout {
                trigger: layout.trigger,
                ..Layout::default()
            });
        }
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    fn set_item_selected(&mut self, index: usize, selected: bool) {
        if let Some(slot) = self.selected.get_mut(index) {
            *slot = selected;
        }
    }

    fn set_focus(&mut self, focus: Option<Focus>) {
        self.focus = focus;
    }

    fn hit_test(&self, position: Position) -> Hit {
        let layout = self.layout.get();
        let cell = CellPosition::new(position.column, position.row);
        if layout.trigger.contains(cell) {
            return Hit::Trigger;
        }
        if !self.list_shown || !layout.list.contains(cell) {
            return Hit::Outside;
        }
        if layout.items.contains(cell) {
            let index = layout.offset + (position.row - layout.items.y) as usize;
            if index < self.labels.len() {
                return Hit::Item(index);
            }
        }
        Hit::Inside
    }
}

/// Cut `s` to at most `max_width` columns, ending in `...` when shortened.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let ellipsis = max_width >= ELLIPSIS.len();
    let budget = if ellipsis {
        max_width - ELLIPSIS.len()
    } else {
        max_width
    };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    if ellipsis {
        out.push_str(ELLIPSIS);
    }
    out
}
