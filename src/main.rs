use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use rusqlite::Connection;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use word_quiz::{
    db, logger, spawn_transfer_worker, ui, App, Config, DictionaryTransfer, QuizEngine, Result,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const USAGE: &str = "\
Usage: word-quiz [COMMAND]

Without a command the interactive quiz starts.

Commands:
  export <path>   Write the whole dictionary to a JSON file
  import <path>   Merge words from a JSON file into the dictionary
  stats           Print learning statistics";

enum Command {
    Tui,
    Export(PathBuf),
    Import(PathBuf),
    Stats,
    Help,
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [] => Some(Command::Tui),
        [cmd, path] if cmd == "export" => Some(Command::Export(PathBuf::from(path))),
        [cmd, path] if cmd == "import" => Some(Command::Import(PathBuf::from(path))),
        [cmd] if cmd == "stats" => Some(Command::Stats),
        [cmd] if cmd == "-h" || cmd == "--help" || cmd == "help" => Some(Command::Help),
        _ => None,
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };
    if let Command::Help = command {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let config = Config::from_env()?;
    std::fs::create_dir_all(&config.data_dir)?;
    logger::init(&config.log_path())?;
    tracing::info!(db = %config.db_path.display(), "Starting word-quiz");

    let conn = db::init_db(&config.db_path)?;

    match command {
        Command::Export(path) => {
            let report = DictionaryTransfer::new(&conn).export_to_path(&path)?;
            println!("{} to {}", report.summary(), path.display());
        }
        Command::Import(path) => {
            let report = DictionaryTransfer::new(&conn).import_from_path(&path)?;
            println!("{}", report.summary());
        }
        Command::Stats => print_stats(&conn)?,
        Command::Tui => run_tui(conn, config)?,
        Command::Help => {}
    }
    Ok(())
}

fn print_stats(conn: &Connection) -> Result<()> {
    let stats = QuizEngine::new(conn).statistics()?;
    println!("Total words:  {}", stats.total_words);
    println!(
        "Learned:      {} ({:.0}%)",
        stats.learned_words,
        stats.progress_percentage()
    );
    println!("In progress:  {}", stats.in_progress_words);
    println!("Not started:  {}", stats.not_started_words);
    println!(
        "Answers:      {} correct, {} wrong ({:.0}% accuracy)",
        stats.total_correct_answers,
        stats.total_wrong_answers,
        stats.overall_accuracy()
    );
    Ok(())
}

fn run_tui(conn: Connection, config: Config) -> Result<()> {
    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let worker = spawn_transfer_worker(config.db_path.clone(), response_tx, request_rx)?;
    let mut app = App::new(conn, config).with_transfer_worker(request_tx, response_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the app closes the request channel and lets the worker exit.
    drop(app);
    if worker.join().is_err() {
        tracing::error!("Transfer worker panicked");
    }
    tracing::info!("Exiting word-quiz");

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            break;
        }

        app.poll_transfers();
    }
    Ok(())
}
