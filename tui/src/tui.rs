use crate::board::SharedBoard;
use cagrid_lib::{Automaton, Config, Error};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use std::{
    error,
    io::{self, Write},
    time::{Duration, Instant},
};

const HELP: &str = "[space] start/stop  [n] step  [r] randomize  [+/-] speed  [q] quit";

/// How long to wait for input when the automaton is not running.
const IDLE_POLL: Duration = Duration::from_secs(1);

struct App<'a> {
    automaton: Automaton,
    board: SharedBoard,
    config: &'a Config,
    /// The last error, shown instead of the help line.
    message: Option<String>,
}

impl App<'_> {
    fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (_, height) = terminal::size()?;
        let status = if self.automaton.is_running() {
            "Running"
        } else {
            "Paused"
        };
        queue!(
            out,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Reverse),
            Print(format!(
                "Gen: {}  Interval: {} ms  {}",
                self.automaton.generation(),
                self.automaton.auto_step_interval_ms(),
                status
            )),
            SetAttribute(Attribute::Reset),
        )?;
        let board = self.board.borrow();
        for (y, line) in board.lines().take(height.saturating_sub(2) as usize).enumerate() {
            queue!(out, cursor::MoveTo(0, y as u16 + 1), Print(line))?;
        }
        queue!(
            out,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(self.message.as_deref().unwrap_or(HELP)),
            SetAttribute(Attribute::Reset),
        )?;
        out.flush()
    }

    fn report<T>(&mut self, result: Result<T, Error>) {
        if let Err(e) = result {
            self.message = Some(e.to_string());
        }
    }

    fn toggle(&mut self) {
        if self.automaton.is_running() {
            self.automaton.stop();
        } else {
            let result = self.automaton.start(None).map(|_| ());
            self.report(result);
        }
    }

    fn randomize(&mut self) {
        let result = self
            .config
            .soup()
            .and_then(|soup| self.automaton.set_state(soup).map(|_| ()));
        self.report(result);
    }

    /// Multiplies the interval by `num / den`, keeping it positive.
    fn scale_interval(&mut self, num: u64, den: u64) {
        let interval = (self.automaton.auto_step_interval_ms() * num / den).max(1);
        let result = self.automaton.set_auto_step_interval_ms(interval);
        self.report(result);
    }

    /// Handles a key press. Returns `false` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        self.message = None;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
            KeyCode::Char('n') => {
                let result = self.automaton.step().map(|_| ());
                self.report(result);
            }
            KeyCode::Char('r') => self.randomize(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.scale_interval(1, 2),
            KeyCode::Char('-') => self.scale_interval(2, 1),
            _ => (),
        }
        true
    }

    fn run<W: Write>(&mut self, out: &mut W) -> Result<(), Box<dyn error::Error>> {
        self.draw(out)?;
        loop {
            let timeout = match self.automaton.next_tick() {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => IDLE_POLL,
            };
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press,
                        ..
                    }) => {
                        if !self.handle_key(code) {
                            break;
                        }
                    }
                    Event::Resize(_, _) => (),
                    _ => continue,
                }
            } else {
                let result = self.automaton.tick(Instant::now());
                match result {
                    Ok(false) => continue,
                    result => self.report(result),
                }
            }
            self.draw(out)?;
        }
        Ok(())
    }
}

/// Runs the automaton in the terminal until the user quits,
/// then prints the last generation.
pub(crate) fn run_with_tui(
    automaton: Automaton,
    board: SharedBoard,
    config: &Config,
) -> Result<(), Box<dyn error::Error>> {
    let mut app = App {
        automaton,
        board,
        config,
        message: None,
    };
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let result = app.run(&mut stdout);
    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;

    debug!("Quit at generation {}", app.automaton.generation());
    print!("{}", app.board.borrow());
    Ok(())
}
