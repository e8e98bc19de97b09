//! Watch command implementation - interactive TUI viewer.

// CLI watch uses intentional casts for display and timing
#![allow(
    clippy::needless_pass_by_value,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridbot::gp::load_program;
use gridbot::{Cell, Program, SimError, World, sim::MIN_ARENA};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the program cannot be loaded or the TUI fails.
pub(crate) fn execute(
    program_path: PathBuf,
    steps: usize,
    width: u16,
    height: u16,
    seed: Option<u64>,
    speed: u64,
) -> Result<(), CliError> {
    if width < MIN_ARENA || height < MIN_ARENA {
        return Err(SimError::InvalidArena { width, height }.into());
    }

    let program = load_program(&program_path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", program_path.display())))?;

    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    run_tui(&program, steps, width, height, seed, speed)
}

/// App state for the TUI.
struct App<'p> {
    world: World<'p>,
    program: &'p Program,
    width: u16,
    height: u16,
    seed: u64,
    steps_taken: usize,
    max_steps: usize,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
    error: Option<SimError>,
}

impl<'p> App<'p> {
    fn new(
        program: &'p Program,
        max_steps: usize,
        width: u16,
        height: u16,
        seed: u64,
        speed_ms: u64,
    ) -> Result<Self, CliError> {
        let world = spawn_world(program, width, height, seed)?;
        Ok(Self {
            world,
            program,
            width,
            height,
            seed,
            steps_taken: 0,
            max_steps,
            paused: true, // Start paused
            speed_ms: speed_ms.clamp(5, 2000),
            last_step: Instant::now(),
            error: None,
        })
    }

    fn finished(&self) -> bool {
        self.steps_taken >= self.max_steps || self.error.is_some()
    }

    fn step_forward(&mut self) {
        if self.finished() {
            return;
        }
        match self.world.step() {
            Ok(()) => self.steps_taken += 1,
            Err(e) => self.error = Some(e),
        }
        self.last_step = Instant::now();
    }

    fn restart(&mut self) -> Result<(), CliError> {
        self.world = spawn_world(self.program, self.width, self.height, self.seed)?;
        self.steps_taken = 0;
        self.error = None;
        self.paused = true;
        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(25).max(5);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 25).min(2000);
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && !self.finished()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

fn spawn_world<'p>(
    program: &'p Program,
    width: u16,
    height: u16,
    seed: u64,
) -> Result<World<'p>, CliError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let row = rng.gen_range(1..height - 1);
    let col = rng.gen_range(1..width - 1);
    World::new(program, width, height, row, col).map_err(CliError::from)
}

fn run_tui(
    program: &Program,
    steps: usize,
    width: u16,
    height: u16,
    seed: u64,
    speed: u64,
) -> Result<(), CliError> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(program, steps, width, height, seed, speed)?;

    loop {
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if app.should_auto_step() {
            app.step_forward();
        }

        if event::poll(Duration::from_millis(10)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Right | KeyCode::Char('l') => {
                    app.paused = true;
                    app.step_forward();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                KeyCode::Char('r') => app.restart()?,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_arena(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.error.is_some() {
        "FAILED"
    } else if app.finished() {
        "DONE"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let title = format!(
        " Gridbot Viewer | Step {}/{} | {} | Speed: {}ms ",
        app.steps_taken, app.max_steps, status, app.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_arena(f: &mut Frame, area: Rect, app: &App) {
    let world = &app.world;
    let (agent_row, agent_col) = world.position();

    let visible_width = (area.width as usize)
        .saturating_sub(2)
        .min(world.width() as usize);
    let visible_height = (area.height as usize)
        .saturating_sub(2)
        .min(world.height() as usize);

    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    for row in 0..visible_height as u16 {
        let mut spans = Vec::with_capacity(visible_width);
        for col in 0..visible_width as u16 {
            let (ch, color) = if (row, col) == (agent_row, agent_col) {
                ("P", Color::Yellow)
            } else {
                match app.world.cell(row, col) {
                    Some(Cell::Wall) => ("+", Color::DarkGray),
                    Some(Cell::Visited) => ("o", Color::Green),
                    Some(Cell::Unvisited) | None => (" ", Color::Reset),
                }
            };
            spans.push(Span::styled(ch, Style::default().fg(color)));
        }
        lines.push(Line::from(spans));
    }

    let arena_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Arena "));

    f.render_widget(arena_widget, area);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let world = &app.world;
    let (row, col) = world.position();

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("State: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}", world.state())),
        ]),
        Line::from(vec![
            Span::styled("Position: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("({row}, {col})")),
        ]),
        Line::from(vec![
            Span::styled("Visited: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "{}/{}",
                world.visited_count(),
                world.interior_count()
            )),
        ]),
        Line::from(vec![
            Span::styled("Coverage: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{:.1}%", world.fraction_visited() * 100.0)),
        ]),
    ];

    if let Some(e) = app.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{e}"),
            Style::default().fg(Color::Red),
        )));
    }

    let stats_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Agent "));

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.finished() {
        " [q] Quit  [r] Restart "
    } else {
        " [q] Quit  [Space] Pause  [→] Step  [+/-] Speed  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
