//! # Select Example
//!
//! Two select controls side by side, driven by real terminal input:
//! - Converting crossterm events with [`InputEvent::from_terminal`] and
//!   dispatching them through a shared [`Document`]
//! - Rendering each control with [`TerminalSurface`]
//! - Subscribing to `"change"` events
//! - Moving focus between controls when a control leaves Tab unhandled
//!
//! Run with: `cargo run --example select [config.toml]`
//!
//! The optional TOML file configures the first control:
//!
//! ```toml
//! placeholder = "Pick a fruit"
//! options = ["Apple", "Banana", "Cherry"]
//! ```

use futures::StreamExt;
use picklist::crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyModifiers,
};
use picklist::crossterm::execute;
use picklist::ratatui::layout::{Constraint, Layout, Rect};
use picklist::ratatui::style::{Color, Style};
use picklist::ratatui::text::{Line, Span};
use picklist::ratatui::widgets::{Block, Paragraph};
use picklist::ratatui::{DefaultTerminal, Frame};
use picklist::{Document, InputEvent, Select, SelectConfig, TerminalSurface};
use std::cell::RefCell;
use std::rc::Rc;

type Control = Select<TerminalSurface>;

struct App {
    document: Document,
    controls: Vec<Control>,
    focused: usize,
    status: Rc<RefCell<String>>,
}

impl App {
    fn new(fruit: SelectConfig) -> Self {
        let document = Document::new();
        let left = document.create_container("left");
        let right = document.create_container("right");

        let fruit = Select::new(
            fruit,
            TerminalSurface::new().with_block(Block::bordered().title(" Fruit ")),
            &document,
            left,
        );
        let size = Select::new(
            SelectConfig::new(["Small", "Medium", "Large", "Family size"]).with_placeholder("Size"),
            TerminalSurface::new()
                .with_block(Block::bordered().title(" Size "))
                .with_max_visible(3),
            &document,
            right,
        );

        let status = Rc::new(RefCell::new(String::from("Nothing chosen yet")));
        for (name, control) in [("fruit", &fruit), ("size", &size)] {
            let status = Rc::clone(&status);
            control.subscribe(picklist::widgets::CHANGE, move |label| {
                *status.borrow_mut() = format!("{name} changed to {label}");
            });
        }
        fruit.focus();

        Self {
            document,
            controls: vec![fruit, size],
            focused: 0,
            status,
        }
    }

    /// Returns `false` once the user asked to quit.
    fn handle(&mut self, event: &Event) -> bool {
        let Some(input) = InputEvent::from_terminal(event) else {
            return true;
        };
        let result = self.document.dispatch(&input);
        self.sync_focus();
        if result.is_consumed() {
            return true;
        }

        let InputEvent::Key(key) = input else {
            return true;
        };
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char('q') => false,
            KeyCode::Tab => {
                self.move_focus(1);
                true
            }
            KeyCode::BackTab => {
                self.move_focus(self.controls.len() - 1);
                true
            }
            _ => true,
        }
    }

    /// Follow focus that moved by clicking.
    fn sync_focus(&mut self) {
        if let Some(index) = self.controls.iter().position(|c| c.focused().is_some()) {
            self.focused = index;
        }
    }

    fn move_focus(&mut self, step: usize) {
        self.controls[self.focused].blur();
        self.focused = (self.focused + step) % self.controls.len();
        self.controls[self.focused].focus();
    }

    fn view(&self, frame: &mut Frame) {
        let [title, body, status, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Span::styled(
                " picklist demo",
                Style::default().fg(Color::Cyan),
            )),
            title,
        );

        let columns: [Rect; 2] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .spacing(2)
                .areas(body);
        for (control, area) in self.controls.iter().zip(columns) {
            control.surface().render(frame, area);
        }

        frame.render_widget(Paragraph::new(format!(" {}", self.status.borrow())), status);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" tab", Style::default().fg(Color::Cyan)),
                Span::raw(" next  "),
                Span::styled("enter/space", Style::default().fg(Color::Cyan)),
                Span::raw(" open/choose  "),
                Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
                Span::raw(" move  "),
                Span::styled("esc", Style::default().fg(Color::Cyan)),
                Span::raw(" close  "),
                Span::styled("q", Style::default().fg(Color::Cyan)),
                Span::raw(" quit"),
            ])),
            help,
        );
    }
}

async fn run(terminal: &mut DefaultTerminal, mut app: App) -> std::io::Result<()> {
    let mut events = EventStream::new();
    loop {
        terminal.draw(|frame| app.view(frame))?;
        let Some(event) = events.next().await else {
            return Ok(());
        };
        if !app.handle(&event?) {
            return Ok(());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log = picklist::log_to_file("picklist-demo.log")?;

    let fruit = match std::env::args().nth(1) {
        Some(path) => SelectConfig::load(path)?,
        None => SelectConfig::new(["Apple", "Banana", "Cherry", "Dragon fruit", "Elderberry"])
            .with_placeholder("Pick a fruit"),
    };

    let mut terminal = picklist::ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = run(&mut terminal, App::new(fruit)).await;
    execute!(std::io::stdout(), DisableMouseCapture).ok();
    picklist::ratatui::restore();

    result?;
    Ok(())
}
