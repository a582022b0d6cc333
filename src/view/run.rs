//! Terminal lifecycle and the event loop (impure shell).
//!
//! Everything stateful-but-pure lives in `GridState`/`Windower`; this
//! module wires them to the terminal, the fetch worker, and the
//! column-order persistence. The loop is cooperative and single
//! threaded: each tick drains fetch results, reconciles derived state,
//! decides whether to request another page, draws, then handles at most
//! one input event.

use crate::config::{self, ResolvedConfig};
use crate::model::{AppError, ColumnId};
use crate::source::{DataSource, FetchEvent, PageFetcher};
use crate::state::{applicant_columns, ColumnLayout, GridState};
use crate::view::styles::{ColorConfig, GridStyles};
use crate::view::table;
use crate::view_state::{WindowParams, Windower};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Event poll timeout per loop iteration.
const TICK: Duration = Duration::from_millis(50);
const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 2;

/// The composed application: pure state plus its impure collaborators.
pub struct GridApp {
    grid: GridState,
    windower: Windower,
    fetcher: PageFetcher,
    styles: GridStyles,
    row_cursor: usize,
    col_cursor: usize,
    column_order_path: PathBuf,
    should_quit: bool,
}

impl GridApp {
    /// Build the application: restore the persisted column order, spawn
    /// the fetch worker, and request the first page.
    pub fn new(
        source: Box<dyn DataSource>,
        config: &ResolvedConfig,
        no_color: bool,
    ) -> Result<Self, AppError> {
        let columns = match config::load_column_order(&config.column_order_path) {
            Some(saved) => ColumnLayout::with_saved_order(applicant_columns(), &saved),
            None => ColumnLayout::new(applicant_columns()),
        };
        let mut grid = GridState::new(columns);

        let mut fetcher = PageFetcher::spawn(source, config.page_size)?;
        if let Err(err) = fetcher.request_next_page(None) {
            grid.fetch_failed(&err);
        }

        let windower = Windower::new(WindowParams {
            // Heights are terminal lines here; rows default to one line.
            estimate: 1,
            overscan: config.overscan,
            fetch_threshold: config.fetch_threshold,
            measured: config.measured,
        });

        Ok(Self {
            grid,
            windower,
            fetcher,
            styles: GridStyles::new(ColorConfig::from_env_and_args(no_color)),
            row_cursor: 0,
            col_cursor: 0,
            column_order_path: config.column_order_path.clone(),
            should_quit: false,
        })
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// One cooperative step: drain fetch results, reconcile derived
    /// state, and trigger fetch-more if the scroll position qualifies.
    pub fn tick(&mut self) {
        for fetch_event in self.fetcher.poll() {
            match fetch_event {
                FetchEvent::Page { index, page } => {
                    let appended = self.grid.apply_page(index, page);
                    if appended > 0 {
                        info!(appended, total = self.grid.total_fetched(), "Applied page");
                    }
                }
                FetchEvent::Failed(err) => {
                    error!(%err, "Page fetch failed");
                    self.grid.fetch_failed(&err);
                }
            }
        }
        self.sync_derived_state();
        self.maybe_fetch_more();
    }

    /// Reconcile the windower and cursors with the current row slice.
    fn sync_derived_state(&mut self) {
        let slice_len = self.grid.page_rows().len();
        self.windower.set_row_count(slice_len);
        self.row_cursor = self.row_cursor.min(slice_len.saturating_sub(1));
        self.col_cursor = self
            .col_cursor
            .min(self.grid.columns().len().saturating_sub(1));

        if self.windower.params().measured {
            let window = self.windower.window();
            let columns: Vec<_> = self.grid.columns().ordered().collect();
            let heights: Vec<(usize, crate::model::RowId, usize)> = window
                .indices()
                .filter_map(|index| {
                    self.grid.page_rows().get(index).map(|row| {
                        (index, row.id, table::display_height(row, &columns, true))
                    })
                })
                .collect();
            for (index, id, height) in heights {
                self.windower.record_height(index, id, height);
            }
        }
    }

    /// Fetch-more trigger. Auto-fetch only while the pager exposes the
    /// tail of loaded data — on earlier pagination pages scrolling near
    /// the bottom means the bottom of that page, not of the dataset.
    fn maybe_fetch_more(&mut self) {
        let showing_tail = self.grid.page_range().end == self.grid.total_fetched();
        if !showing_tail {
            return;
        }
        let wanted = self.windower.should_fetch_more(
            self.fetcher.is_fetching(),
            self.grid.total_fetched(),
            self.grid.total_db_rows(),
        );
        if wanted {
            let spec = self.grid.sort_spec().cloned();
            if let Err(err) = self.fetcher.request_next_page(spec.as_ref()) {
                self.grid.fetch_failed(&err);
            }
        }
    }

    /// Render one frame. Also records the body height as the windower's
    /// viewport, so windowing follows terminal resizes for free.
    pub fn draw(&mut self, frame: &mut Frame) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(frame.area());

        self.windower.set_viewport_height(body_area.height as usize);

        let header = table::header_line(&self.grid, &self.styles, self.col_cursor);
        frame.render_widget(Paragraph::new(header), header_area);

        let body = table::body_lines(&self.grid, &self.windower, &self.styles, self.row_cursor);
        frame.render_widget(Paragraph::new(body), body_area);

        let footer = table::footer_lines(&self.grid, &self.styles);
        frame.render_widget(Paragraph::new(footer), footer_area);
    }

    /// Apply one key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(self.windower.viewport_height() as isize),
            KeyCode::PageUp => self.move_cursor(-(self.windower.viewport_height() as isize)),
            KeyCode::Char('g') | KeyCode::Home => {
                self.row_cursor = 0;
                self.windower.scroll_to(0);
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.row_cursor = self.grid.page_rows().len().saturating_sub(1);
                self.windower.scroll_to(usize::MAX);
            }

            KeyCode::Char('h') | KeyCode::Left => {
                self.col_cursor = self.col_cursor.saturating_sub(1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.col_cursor = (self.col_cursor + 1)
                    .min(self.grid.columns().len().saturating_sub(1));
            }
            KeyCode::Char('H') => self.reorder_current_column(-1),
            KeyCode::Char('L') => self.reorder_current_column(1),

            KeyCode::Char('s') => self.toggle_sort_at_cursor(),

            KeyCode::Char(' ') => {
                if let Some(row) = self.grid.page_rows().get(self.row_cursor) {
                    self.grid.toggle_row(row.id);
                }
            }
            KeyCode::Char('v') => self.grid.toggle_page_selection(),
            KeyCode::Char('a') => self.grid.toggle_all_selection(),
            KeyCode::Char('c') => self.grid.clear_selection(),

            KeyCode::Char('[') => self.change_page(|grid| grid.prev_page()),
            KeyCode::Char(']') => self.change_page(|grid| grid.next_page()),
            KeyCode::Char('{') => self.change_page(|grid| grid.first_page()),
            KeyCode::Char('}') => self.change_page(|grid| grid.last_page()),
            KeyCode::Char('z') => self.change_page(|grid| grid.cycle_page_size()),

            _ => {}
        }
    }

    /// Id of the column under the column cursor.
    fn current_column(&self) -> Option<ColumnId> {
        self.grid.columns().order().get(self.col_cursor).cloned()
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.grid.page_rows().len();
        if len == 0 {
            return;
        }
        let next = self.row_cursor.saturating_add_signed(delta).min(len - 1);
        self.row_cursor = next;
        self.windower.ensure_visible(next);
    }

    /// Cycle the sort on the column under the cursor. A real change
    /// invalidates all loaded pages: rekey the fetcher (stale-response
    /// guard), reset scroll and measured heights, refetch from page 0.
    fn toggle_sort_at_cursor(&mut self) {
        let Some(column) = self.current_column() else {
            return;
        };
        if !self.grid.toggle_sort(&column) {
            return;
        }
        self.fetcher.rekey();
        self.windower.reset();
        self.row_cursor = 0;
        let spec = self.grid.sort_spec().cloned();
        if let Err(err) = self.fetcher.request_next_page(spec.as_ref()) {
            self.grid.fetch_failed(&err);
        }
        self.sync_derived_state();
    }

    /// Move the column under the cursor one slot left or right and
    /// persist the new order. The drop position is the neighbor, so the
    /// gesture maps to `reorder(source, neighbor)`.
    fn reorder_current_column(&mut self, direction: isize) {
        let order = self.grid.columns().order();
        let Some(source) = order.get(self.col_cursor).cloned() else {
            return;
        };
        let Some(target_at) = self.col_cursor.checked_add_signed(direction) else {
            return;
        };
        let Some(target) = order.get(target_at).cloned() else {
            return;
        };
        if self.grid.reorder_column(&source, &target) {
            self.col_cursor = target_at;
            self.persist_column_order();
        }
    }

    /// Write the column order synchronously; failure is logged and never
    /// interrupts the session.
    fn persist_column_order(&self) {
        let order: Vec<ColumnId> = self.grid.columns().order().to_vec();
        if let Err(err) = config::save_column_order(&self.column_order_path, &order) {
            error!(%err, "Failed to persist column order");
        }
    }

    /// Pagination changes re-anchor the window: new slice identity, so
    /// scroll to top and drop measurements.
    fn change_page(&mut self, op: impl FnOnce(&mut GridState)) {
        op(&mut self.grid);
        self.row_cursor = 0;
        self.windower.reset();
        self.sync_derived_state();
    }
}

/// Errors that can occur during TUI operations.
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(io_err) => AppError::Terminal(io_err),
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), TuiError> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the grid TUI until the user quits.
///
/// # Errors
///
/// Returns [`AppError::Terminal`] for terminal failures. Fetch failures
/// never abort the loop — they surface in the footer.
pub fn run(
    source: Box<dyn DataSource>,
    config: &ResolvedConfig,
    no_color: bool,
) -> Result<(), AppError> {
    let mut app = GridApp::new(source, config, no_color)?;
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut app, &mut terminal);

    // Restore the terminal even when the loop failed.
    let restore = restore_terminal(&mut terminal);
    result?;
    restore?;
    Ok(())
}

fn event_loop(
    app: &mut GridApp,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), AppError> {
    while !app.should_quit() {
        app.tick();
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                // Resize is picked up on the next draw via the layout.
                _ => {}
            }
        }
    }
    Ok(())
}
