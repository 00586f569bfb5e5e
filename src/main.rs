mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use ringcheck::{
    config::{Config, ConfigStore, FileConfigStore},
    difficulty::{Difficulty, DifficultyName},
    events::{OneOrMany, OutboundMessage, SkillCheckOver, StartSkillCheck},
    runtime::{CrosstermEventSource, FixedTicker, OverlayEvent, Runner},
    session::SkillCheckController,
};

/// circular skill-check overlay driven from the command line
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Runs a circular skill check in the terminal: press the shown key while the \
marker passes through the highlighted arc. Multiple difficulties chain into a multi-stage \
check; the outcome is printed as a skillCheckOver message on exit."
)]
pub struct Cli {
    /// difficulty for each stage, in order
    #[clap(short = 'd', long = "difficulty", value_enum)]
    difficulty: Vec<CliDifficulty>,

    /// candidate input keys the expected key is drawn from
    #[clap(short = 'i', long, value_delimiter = ',')]
    inputs: Option<Vec<String>>,

    /// raw startSkillCheck payload (JSON), overriding --difficulty/--inputs
    #[clap(long)]
    payload: Option<String>,

    /// seed for deterministic window and key draws
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
enum CliDifficulty {
    Easy,
    Medium,
    Hard,
}

impl CliDifficulty {
    fn as_difficulty(self) -> Difficulty {
        Difficulty::Named(match self {
            CliDifficulty::Easy => DifficultyName::Easy,
            CliDifficulty::Medium => DifficultyName::Medium,
            CliDifficulty::Hard => DifficultyName::Hard,
        })
    }
}

impl Cli {
    /// Build the start request, preferring an explicit payload.
    fn to_start_request(&self) -> Result<StartSkillCheck, serde_json::Error> {
        if let Some(payload) = &self.payload {
            return serde_json::from_str(payload);
        }

        let difficulties = if self.difficulty.is_empty() {
            vec![CliDifficulty::Easy]
        } else {
            self.difficulty.clone()
        };
        Ok(StartSkillCheck {
            difficulty: OneOrMany::Many(
                difficulties
                    .iter()
                    .map(|d| d.as_difficulty())
                    .collect(),
            ),
            inputs: self.inputs.clone(),
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .init();

    let cli = Cli::parse();

    let request = match cli.to_start_request() {
        Ok(request) => request,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, format!("bad payload: {err}"))
                .exit();
        }
    };

    let mut controller = match cli.seed {
        Some(seed) => SkillCheckController::with_seed(seed),
        None => SkillCheckController::new(),
    };
    if let Err(err) = controller.start(request) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, err.to_string()).exit();
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load();
    if !cli.difficulty.is_empty() {
        let names: Vec<String> = cli.difficulty.iter().map(|d| d.to_string()).collect();
        info!("skill check started: {}", names.join(","));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run_overlay(&mut terminal, &mut controller, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(over) = outcome? {
        println!(
            "{}",
            serde_json::to_string(&OutboundMessage::SkillCheckOver(over))?
        );
    }

    Ok(())
}

fn run_overlay<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut SkillCheckController,
    config: &Config,
) -> Result<Option<SkillCheckOver>, Box<dyn Error>> {
    let event_source = CrosstermEventSource::new();
    let ticker = FixedTicker::new(std::time::Duration::from_millis(config.tick_rate_ms.max(1)));
    let runner = Runner::new(event_source, ticker);
    let dt_secs = runner.tick_interval().as_secs_f64();

    terminal.draw(|f| draw(controller, config, f))?;

    loop {
        match runner.step() {
            OverlayEvent::Tick => {
                controller.on_tick(dt_secs);
                terminal.draw(|f| draw(controller, config, f))?;
            }
            OverlayEvent::Resize => {
                terminal.draw(|f| draw(controller, config, f))?;
            }
            OverlayEvent::Host(event) => {
                if let Some(over) = controller.handle_event(event) {
                    return Ok(Some(over));
                }
            }
            OverlayEvent::Key(key) => {
                if let Some(over) = handle_key(controller, key) {
                    return Ok(Some(over));
                }
            }
        }
    }
}

fn handle_key(controller: &mut SkillCheckController, key: KeyEvent) -> Option<SkillCheckOver> {
    match key.code {
        KeyCode::Esc => controller.cancel(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => controller.cancel(),
        KeyCode::Char(c) => controller.on_key(&c.to_lowercase().to_string()),
        _ => None,
    }
}

fn draw(controller: &SkillCheckController, config: &Config, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    if let Some(view) = controller.view() {
        f.render_widget(
            ui::SkillCheckWidget {
                view: &view,
                show_key_hint: config.show_key_hint,
            },
            chunks[0],
        );
    }

    let help = Paragraph::new("press the shown key while the marker is inside the green arc · esc cancels")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[1]);
}
