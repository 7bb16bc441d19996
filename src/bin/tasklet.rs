// Interactive entry point: reads one command per line from stdin.
use anyhow::{Context, Result};
use simplelog::{LevelFilter, WriteLogger};
use std::env;
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use tasklet::cli::{parse_args, print_help};
use tasklet::config::Config;
use tasklet::context::{AppContext, StandardContext};
use tasklet::controller::{Session, SessionState};
use tasklet::presenter::{Presenter, TerminalPresenter};
use tasklet::storage::LocalStorage;
use tasklet::store::TaskStore;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let binary_name = args.first().map(String::as_str).unwrap_or("tasklet");
    let cli = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}\n", e);
            print_help(binary_name);
            std::process::exit(2);
        }
    };
    if cli.help {
        print_help(binary_name);
        return Ok(());
    }

    let ctx = StandardContext::resolve(cli.root.clone());

    let cfg = match Config::load(&ctx) {
        Ok(c) => c,
        Err(e) => {
            // A broken config is reported; only a missing one means defaults.
            if !Config::is_missing_config_error(&e) {
                eprintln!("Error loading configuration:\n{}", e);
                std::process::exit(1);
            }
            let cfg = Config::default();
            if let Err(e) = cfg.save(&ctx) {
                eprintln!("Warning: could not write default config: {:#}", e);
            }
            cfg
        }
    };

    init_logging(&ctx, &cfg);
    install_panic_hook(&ctx);

    let mut presenter = TerminalPresenter::stdout(&cfg.datetime_format);
    let mut session = open_session(&ctx, &cfg, cli.no_save, &mut presenter);

    presenter.show_welcome();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            // EOF behaves like "bye" without the farewell.
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        if session.handle_line(&line, &mut presenter) == SessionState::Exit {
            break;
        }
    }
    log::info!("Session ended with {} task(s)", session.store().len());
    Ok(())
}

fn open_session(
    ctx: &dyn AppContext,
    cfg: &Config,
    no_save: bool,
    presenter: &mut dyn Presenter,
) -> Session {
    if no_save || !cfg.save_tasks {
        log::info!("Persistence disabled for this session");
        return Session::new(TaskStore::new(), None);
    }

    let mut storage = match LocalStorage::new(ctx) {
        Ok(s) => s,
        Err(e) => {
            log::error!("No task file location: {:#}", e);
            presenter.show_error(&format!("{:#}. Changes will not be saved.", e));
            return Session::new(TaskStore::new(), None);
        }
    };

    match storage.load() {
        Ok(tasks) => Session::new(TaskStore::from_tasks(tasks), Some(storage)),
        Err(e) => {
            presenter.show_error(&format!(
                "{:#}. Starting with an empty list; changes will not be saved.",
                e
            ));
            Session::new(TaskStore::new(), None)
        }
    }
}

fn init_logging(ctx: &dyn AppContext, cfg: &Config) {
    let level = env::var("TASKLET_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or_else(|| cfg.log_level_filter());
    if level == LevelFilter::Off {
        return;
    }

    let file = ctx.get_log_file_path().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {:?}", path))
    });
    match file {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
                eprintln!("Warning: logger already initialized: {}", e);
            }
            if cfg.parsed_log_level().is_none() {
                log::warn!("Unknown log level '{}', using 'warn'", cfg.log_level);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
    }
}

fn install_panic_hook(ctx: &dyn AppContext) {
    let crash_log = ctx
        .get_data_dir()
        .map(|d| d.join("tasklet_panic.log"))
        .ok();
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Some(path) = &crash_log
            && let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path)
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));
}
