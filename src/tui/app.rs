use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::model::config::Config;
use crate::model::task::{SubtaskId, TaskId};
use crate::ops::Board;

use super::input;
use super::render;
use super::theme::Theme;

/// Where keyboard input currently goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving over the board
    Navigate,
    /// Typing into the new-task input
    NewTask,
    /// Typing into the add-subtask prompt
    AddSubtask,
    /// Editing a task's description
    EditDescription,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Navigate => "NAVIGATE",
            Mode::NewTask => "NEW TASK",
            Mode::AddSubtask => "SUBTASK",
            Mode::EditDescription => "EDIT",
        }
    }
}

/// A selectable row of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatItem {
    Task(TaskId),
    Subtask {
        task_id: TaskId,
        subtask_id: SubtaskId,
    },
}

impl FlatItem {
    pub fn task_id(self) -> TaskId {
        match self {
            FlatItem::Task(id) => id,
            FlatItem::Subtask { task_id, .. } => task_id,
        }
    }
}

/// Main application state
pub struct App {
    pub board: Board,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Index into the flat row list
    pub cursor: usize,
    /// First visible line of the board
    pub scroll_offset: usize,
    /// Contents of the new-task input
    pub new_task_input: String,
    /// Byte offset of the caret in whichever line input has focus
    pub input_cursor: usize,
    /// One-shot message for the status row
    pub status_message: Option<String>,
}

impl App {
    pub fn new(board: Board, config: &Config) -> Self {
        let mode = if board.tasks().is_empty() {
            Mode::NewTask
        } else {
            Mode::Navigate
        };
        App {
            board,
            mode,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            show_help: false,
            cursor: 0,
            scroll_offset: 0,
            new_task_input: String::new(),
            input_cursor: 0,
            status_message: None,
        }
    }

    /// Every task followed by its subtasks, in display order
    pub fn build_flat_items(&self) -> Vec<FlatItem> {
        let mut items = Vec::new();
        for task in self.board.tasks() {
            items.push(FlatItem::Task(task.id));
            items.extend(task.subtasks.iter().map(|s| FlatItem::Subtask {
                task_id: task.id,
                subtask_id: s.id,
            }));
        }
        items
    }

    pub fn cursor_item(&self) -> Option<FlatItem> {
        self.build_flat_items().get(self.cursor).copied()
    }

    pub fn cursor_task_id(&self) -> Option<TaskId> {
        self.cursor_item().map(FlatItem::task_id)
    }

    /// Keep the cursor on an existing row after a removal
    pub fn clamp_cursor(&mut self) {
        let len = self.build_flat_items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Put the cursor on the given row, if present
    pub fn focus(&mut self, item: FlatItem) {
        if let Some(idx) = self.build_flat_items().iter().position(|i| *i == item) {
            self.cursor = idx;
        }
    }

    /// Text of the focused line input, if one has focus
    pub fn active_input(&self) -> Option<&str> {
        match self.mode {
            Mode::NewTask => Some(self.new_task_input.as_str()),
            Mode::AddSubtask => self.board.add_subtask_session().name(),
            _ => None,
        }
    }
}

/// Run the TUI application
pub fn run(board: Board, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(board, config);
    info!(tasks = app.board.tasks().len(), "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!(
        tasks = app.board.tasks().len(),
        completed = app.board.tasks().completed_count(),
        "tui exited"
    );
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
