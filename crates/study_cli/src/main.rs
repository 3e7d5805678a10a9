use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;
use std::io::{self, BufRead};
use study_cli::cli::{Cli, Command, collect_config_overrides};
use study_core::Responder;
use study_core::config::{self, Config, Palette, check_config, merge_overrides, palette_for_theme};
use study_core::error::AppError;
use study_core::model::{ReminderEntry, Response, StudyPlan};
use study_core::planner::generate_plan;
use study_core::storage::{JsonFileStore, ReminderStore, json_store};
use study_core::{clock, time_parse};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const LOG_ENV_VAR: &str = "STUDYAGENT_LOG";

const DEMO_MESSAGES: [&str; 4] = [
    "Plan my study for 2 hours on DSA",
    "Remind me to study DSA tomorrow",
    "Check my progress",
    "Hello",
];

struct Context {
    config: Config,
    palette: Palette,
}

impl Context {
    fn load(raw_overrides: &[String]) -> Result<Self, AppError> {
        let loaded = config::load_config_with_fallback();
        if let Some(err) = loaded.error.as_ref() {
            log::warn!("ignoring configuration file: {err}");
        }

        let overrides = collect_config_overrides(raw_overrides).map_err(AppError::invalid_input)?;
        let config = merge_overrides(&loaded.config, &overrides);
        check_config(&config).map_err(AppError::invalid_input)?;
        let palette = palette_for_theme(config.theme.as_deref());

        Ok(Self { config, palette })
    }

    fn store(&self) -> Result<JsonFileStore, AppError> {
        let path = json_store::store_path(self.config.reminders_path.as_deref())?;
        log::debug!("using reminder file {}", path.display());
        Ok(JsonFileStore::new(path))
    }
}

#[derive(Tabled)]
struct CycleRow {
    #[tabled(rename = "Step")]
    step: u32,
    #[tabled(rename = "Study")]
    study: String,
    #[tabled(rename = "Break")]
    rest: String,
    #[tabled(rename = "Task")]
    task: String,
}

#[derive(Tabled)]
struct ReminderRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Text")]
    text: String,
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|err| AppError::invalid_data(err.to_string()))
}

fn print_plan(plan: &StudyPlan, palette: &Palette) {
    println!(
        "Study plan: {} ({} minutes)",
        palette.accentize(&plan.topic),
        plan.total_minutes
    );
    let rows = plan.cycles.iter().map(|cycle| CycleRow {
        step: cycle.step,
        study: format!("{} min", cycle.study_minutes),
        rest: format!("{} min", cycle.break_minutes),
        task: cycle.task.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{table}");
}

fn print_reminders(entries: &[ReminderEntry], palette: &Palette) {
    if entries.is_empty() {
        println!("{}", palette.mutedize("No reminders saved."));
        return;
    }

    let rows = entries.iter().enumerate().map(|(index, entry)| ReminderRow {
        index: index + 1,
        when: entry.when.clone(),
        text: entry.text.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{table}");
}

fn print_response_plain(response: &Response, palette: &Palette) {
    let label = palette.mutedize(&format!("[{}]", response.intent()));
    match response {
        Response::Plan(plan) => {
            print!("{label} ");
            print_plan(plan, palette);
        }
        Response::Reminder(entry) => {
            println!(
                "{label} Reminder saved for {}: {}",
                palette.accentize(&entry.when),
                entry.text
            );
        }
        Response::Progress(report) => {
            println!(
                "{label} You completed {}% of your weekly study goal ({}).",
                palette.accentize(&report.percent_complete.to_string()),
                report.notes
            );
        }
        Response::Help(help) => println!("{label} {}", help.description),
    }
}

fn print_response(response: &Response, json: bool, palette: &Palette) -> Result<(), AppError> {
    if json {
        println!("{}", to_json(response, false)?);
    } else {
        print_response_plain(response, palette);
    }
    Ok(())
}

fn run_demo(context: &Context, json: bool) -> Result<(), AppError> {
    let store = context.store()?;
    let responder = Responder::with_settings(&store, context.config.settings());
    let mut transcript = Vec::with_capacity(DEMO_MESSAGES.len());

    for message in DEMO_MESSAGES {
        let response = responder.respond(message)?;
        if json {
            transcript.push(serde_json::json!({ "message": message, "response": response }));
        } else {
            println!("USER: {message}");
            println!("AGENT: {}", to_json(&response, true)?);
            println!("{}", "-".repeat(40));
        }
    }

    if json {
        println!("{}", serde_json::Value::Array(transcript));
    }
    Ok(())
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let context = Context::load(&cli.config_override)?;

    match cli.command {
        Command::Ask { message } => {
            let message = message.join(" ");
            let store = context.store()?;
            let responder = Responder::with_settings(&store, context.config.settings());
            let response = responder.respond(&message)?;
            print_response(&response, cli.json, &context.palette)?;
        }
        Command::Plan { hours, topic } => {
            let hours = hours.unwrap_or(context.config.settings().default_hours);
            let plan = generate_plan(topic.as_deref().map(str::trim), hours);
            if cli.json {
                println!("{}", to_json(&plan, false)?);
            } else {
                print_plan(&plan, &context.palette);
            }
        }
        Command::When { text } => {
            let text = text.join(" ");
            let when = time_parse::parse_time(&text)
                .map(clock::format_timestamp)
                .transpose()?;
            if cli.json {
                println!("{}", serde_json::json!({ "text": text, "when": when }));
            } else {
                match when {
                    Some(when) => println!("{}", context.palette.accentize(&when)),
                    None => println!("{}", context.palette.mutedize("No time found.")),
                }
            }
        }
        Command::Reminders => {
            let entries = context.store()?.load_all()?;
            if cli.json {
                println!("{}", to_json(&entries, false)?);
            } else {
                print_reminders(&entries, &context.palette);
            }
        }
        Command::Demo => run_demo(&context, cli.json)?,
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let context = Context::load(&[])?;
    let store = context.store()?;
    let responder = Responder::with_settings(&store, context.config.settings());

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let message = input.trim_end_matches(['\r', '\n']);
        let line = message.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        match responder.respond(message) {
            Ok(response) => print_response_plain(&response, &context.palette),
            Err(err) => eprintln!("ERROR: {}", err),
        }
    }

    Ok(())
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
    println!("In this session, type a message to answer it, or exit/quit to leave.");
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV_VAR, "warn")).init();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
