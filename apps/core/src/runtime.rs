use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{self, ConfigError};
use crate::console_shell::{ConsoleShell, OverlayEvent, OverlayRow};
use crate::core_service::{LauncherService, ServiceError};
use crate::logging;
use crate::model::SearchResult;
use crate::overlay_state::{OverlayState, WindowAction};
use crate::session::LauncherSession;
use crate::transport;

const USAGE: &str = "usage: anilauncher [--config <path>] [--query <text> | --json]";

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeMode {
    Interactive,
    Query(String),
    Json,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub mode: RuntimeMode,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions {
        config_path: None,
        mode: RuntimeMode::Interactive,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("--config requires a path\n{USAGE}"))?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--query" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("--query requires text\n{USAGE}"))?;
                set_mode(&mut options, RuntimeMode::Query(value.clone()))?;
            }
            "--json" => set_mode(&mut options, RuntimeMode::Json)?,
            "-h" | "--help" => options.mode = RuntimeMode::Help,
            other => return Err(format!("unknown argument: {other}\n{USAGE}")),
        }
    }

    Ok(options)
}

fn set_mode(options: &mut RuntimeOptions, mode: RuntimeMode) -> Result<(), String> {
    if options.mode != RuntimeMode::Interactive {
        return Err(format!("--query and --json are mutually exclusive\n{USAGE}"));
    }
    options.mode = mode;
    Ok(())
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    if options.mode == RuntimeMode::Help {
        println!("{USAGE}");
        return Ok(());
    }

    match logging::init() {
        Ok(path) => logging::info(&format!("logging to {}", path.display())),
        Err(error) => eprintln!("[anilauncher] logging disabled: {error}"),
    }

    let config = config::load(options.config_path.as_deref())?;
    if !config.config_path.exists() {
        config::save(&config)?;
        logging::info(&format!(
            "wrote default config to {}",
            config.config_path.display()
        ));
    }
    logging::info(&format!(
        "startup hotkey={} applications_dir={} config_path={}",
        config.hotkey,
        config.applications_dir.display(),
        config.config_path.display(),
    ));

    let service = LauncherService::new(config)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    match options.mode {
        RuntimeMode::Query(query) => {
            let mut out = stdout.lock();
            print_one_shot(&service, &query, &mut out)?;
            Ok(())
        }
        RuntimeMode::Json => serve_json(&service, stdin.lock(), stdout.lock()),
        RuntimeMode::Interactive | RuntimeMode::Help => {
            let mut shell = ConsoleShell::new(stdin.lock(), stdout.lock());
            run_event_loop(&service, &mut shell)
        }
    }
}

/// Drives the window from shell events until `:quit` or end of input.
/// The window starts shown, as if the hotkey had just been pressed.
pub fn run_event_loop<R: BufRead, W: Write>(
    service: &LauncherService,
    shell: &mut ConsoleShell<R, W>,
) -> Result<(), RuntimeError> {
    let hotkey = service.config().hotkey.clone();
    let suggestions = service.default_suggestions();
    let mut overlay_state = OverlayState::default();
    let mut session = LauncherSession::default();

    overlay_state.toggle();
    shell.show_and_focus(&hotkey)?;
    render(shell, &session, &suggestions)?;

    while let Some(event) = shell.next_event()? {
        if event == OverlayEvent::Quit {
            logging::info("quit requested");
            break;
        }

        if event == OverlayEvent::Toggle {
            match overlay_state.toggle() {
                WindowAction::ShowAndFocus => {
                    shell.show_and_focus(&hotkey)?;
                    render(shell, &session, &suggestions)?;
                }
                WindowAction::Hide => shell.hide()?,
            }
            continue;
        }

        if !overlay_state.is_visible() {
            shell.set_status_text("window hidden; :toggle to show")?;
            continue;
        }

        match event {
            OverlayEvent::QueryChanged(query) => {
                let results = service.search(&query);
                session.set_results(&query, results);
                render(shell, &session, &suggestions)?;
            }
            OverlayEvent::MoveSelection(direction) => {
                let row_count = session.visible_rows(&suggestions).len();
                session.move_selection(direction, row_count);
                render(shell, &session, &suggestions)?;
            }
            OverlayEvent::Submit => {
                let target = session.submission_target(&suggestions).cloned();
                match target {
                    Some(target) => {
                        execute_and_hide(service, &target, &mut overlay_state, &mut session, shell)?
                    }
                    None => shell.set_status_text("No result selected.")?,
                }
            }
            OverlayEvent::Activate(index) => {
                let target = session.activate(index, &suggestions).cloned();
                match target {
                    Some(target) => {
                        execute_and_hide(service, &target, &mut overlay_state, &mut session, shell)?
                    }
                    None => shell.set_status_text(&format!("No row {}.", index + 1))?,
                }
            }
            OverlayEvent::Escape => {
                if overlay_state.on_escape() {
                    shell.hide()?;
                }
            }
            OverlayEvent::Toggle | OverlayEvent::Quit => {}
        }
    }

    Ok(())
}

/// Launch failures are reported and logged; the window hides either way.
fn execute_and_hide<R: BufRead, W: Write>(
    service: &LauncherService,
    target: &SearchResult,
    overlay_state: &mut OverlayState,
    session: &mut LauncherSession,
    shell: &mut ConsoleShell<R, W>,
) -> Result<(), RuntimeError> {
    if let Err(error) = service.execute(target) {
        logging::error(&format!("failed to execute '{}': {error}", target.title));
        shell.set_status_text(&format!("Launch error: {error}"))?;
    }

    session.reset();
    if overlay_state.on_action_executed() {
        shell.hide()?;
    }
    Ok(())
}

fn render<R: BufRead, W: Write>(
    shell: &mut ConsoleShell<R, W>,
    session: &LauncherSession,
    suggestions: &[SearchResult],
) -> Result<(), RuntimeError> {
    let rows = overlay_rows(session.visible_rows(suggestions));
    shell.set_results(&rows, session.selected_index())?;
    Ok(())
}

fn overlay_rows(results: &[SearchResult]) -> Vec<OverlayRow> {
    results.iter().map(OverlayRow::from).collect()
}

fn print_one_shot<W: Write>(
    service: &LauncherService,
    query: &str,
    out: &mut W,
) -> std::io::Result<()> {
    let results = if query.trim().is_empty() {
        service.default_suggestions()
    } else {
        service.search(query)
    };
    for result in &results {
        writeln!(
            out,
            "{}\t{}\t{}",
            result.kind.as_str(),
            result.title,
            result.path
        )?;
    }
    out.flush()
}

pub fn serve_json<R: BufRead, W: Write>(
    service: &LauncherService,
    input: R,
    mut output: W,
) -> Result<(), RuntimeError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(output, "{}", transport::handle_json(service, &line))?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_cli_args, print_one_shot, run_event_loop, serve_json, RuntimeMode};
    use crate::action_executor::{LaunchPlan, RecordingOpener};
    use crate::config::Config;
    use crate::console_shell::ConsoleShell;
    use crate::core_service::LauncherService;
    use crate::discovery::StaticProvider;
    use crate::model::{ResultKind, SearchResult};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn scratch_app(label: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be valid")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "anilauncher-runtime-{label}-{}-{unique}.app",
            std::process::id()
        ));
        std::fs::create_dir_all(&path).expect("app bundle dir should be created");
        path
    }

    fn service_with(app: &Path, opener: RecordingOpener) -> LauncherService {
        let apps = vec![SearchResult::new(
            ResultKind::Application,
            "Notes",
            "Application",
            app.to_string_lossy().as_ref(),
        )];
        LauncherService::new(Config::default())
            .expect("service should initialize")
            .with_providers(vec![Box::new(StaticProvider::new(
                "fixture",
                ResultKind::Application,
                apps,
            ))])
            .with_opener(Box::new(opener))
    }

    #[test]
    fn parses_cli_modes() {
        assert_eq!(parse_cli_args(&[]).unwrap().mode, RuntimeMode::Interactive);
        assert_eq!(
            parse_cli_args(&args(&["--query", "saf"])).unwrap().mode,
            RuntimeMode::Query("saf".to_string())
        );
        let options = parse_cli_args(&args(&["--json", "--config", "/tmp/a.toml"])).unwrap();
        assert_eq!(options.mode, RuntimeMode::Json);
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/a.toml")));
    }

    #[test]
    fn rejects_conflicting_or_unknown_arguments() {
        assert!(parse_cli_args(&args(&["--json", "--query", "x"])).is_err());
        assert!(parse_cli_args(&args(&["--config"])).is_err());
        assert!(parse_cli_args(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn submit_launches_first_match_and_hides() {
        let app = scratch_app("submit");
        let opener = RecordingOpener::default();
        let service = service_with(&app, opener.clone());

        let mut shell = ConsoleShell::new(Cursor::new(b"note\n\n".to_vec()), Vec::new());
        run_event_loop(&service, &mut shell).unwrap();

        assert_eq!(opener.plans(), vec![LaunchPlan::OpenApplication(app.clone())]);
        assert!(!shell.is_visible());
        std::fs::remove_dir_all(&app).unwrap();
    }

    #[test]
    fn toggling_closed_and_open_keeps_query() {
        let app = scratch_app("toggle");
        let opener = RecordingOpener::default();
        let service = service_with(&app, opener.clone());

        let input = b"note\n:toggle\n:toggle\n\n".to_vec();
        let mut shell = ConsoleShell::new(Cursor::new(input), Vec::new());
        run_event_loop(&service, &mut shell).unwrap();

        assert_eq!(opener.plans(), vec![LaunchPlan::OpenApplication(app.clone())]);
        assert!(!shell.is_visible());
        let rendered = String::from_utf8(shell.into_output()).unwrap();
        assert_eq!(rendered.matches("--- hidden ---").count(), 2);
        std::fs::remove_dir_all(&app).unwrap();
    }

    #[test]
    fn escape_hides_without_launching() {
        let app = scratch_app("escape");
        let opener = RecordingOpener::default();
        let service = service_with(&app, opener.clone());

        let mut shell = ConsoleShell::new(Cursor::new(b"note\n:esc\n\n".to_vec()), Vec::new());
        run_event_loop(&service, &mut shell).unwrap();

        assert!(opener.plans().is_empty());
        let rendered = String::from_utf8(shell.into_output()).unwrap();
        assert!(rendered.contains("window hidden"));
        std::fs::remove_dir_all(&app).unwrap();
    }

    #[test]
    fn activating_web_row_opens_search_url() {
        let app = scratch_app("web");
        let opener = RecordingOpener::default();
        let service = service_with(&app, opener.clone());

        let mut shell = ConsoleShell::new(Cursor::new(b"note\n:2\n".to_vec()), Vec::new());
        run_event_loop(&service, &mut shell).unwrap();

        assert_eq!(
            opener.plans(),
            vec![LaunchPlan::OpenUrl(
                "https://www.google.com/search?q=note".to_string()
            )]
        );
        std::fs::remove_dir_all(&app).unwrap();
    }

    #[test]
    fn one_shot_query_prints_tab_separated_rows() {
        let app = scratch_app("oneshot");
        let service = service_with(&app, RecordingOpener::default());

        let mut out = Vec::new();
        print_one_shot(&service, "zzz", &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "web\tSearch \"zzz\" on Google\tzzz\n");
        std::fs::remove_dir_all(&app).unwrap();
    }

    #[test]
    fn json_mode_answers_each_line() {
        let app = scratch_app("json");
        let service = service_with(&app, RecordingOpener::default());

        let input = "{\"kind\":\"Suggestions\"}\n\nnot json\n";
        let mut out = Vec::new();
        serve_json(&service, Cursor::new(input.as_bytes().to_vec()), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"status\":\"ok\""));
        assert!(lines[1].contains("invalid_json"));
        std::fs::remove_dir_all(&app).unwrap();
    }
}
