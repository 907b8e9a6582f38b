use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::io::{self, Write};
use std::path::PathBuf;
use testrec::api::{
    CmdMessage, CmdResult, ConfigAction, FieldEdit, MessageLevel, TestrecApi, TestrecPaths,
};
use testrec::config::TestrecConfig;
use testrec::error::{Result, TestrecError};
use testrec::model::{Field, Record, TestResult};
use testrec::store::fs_backend::FsBackend;
use testrec::store::RecordStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = TestrecPaths {
        config_dir: config_dir()?,
    };

    // These don't need a data file.
    match &cli.command {
        Some(Commands::Files { dir }) => return handle_files(dir.clone()),
        Some(Commands::Config { key, value }) => {
            return handle_config(&paths, key.clone(), value.clone())
        }
        _ => {}
    }

    let config = TestrecConfig::load(&paths.config_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read config, using defaults");
        TestrecConfig::default()
    });
    let file = cli.file.clone().unwrap_or(config.default_file.clone());
    let is_init = matches!(cli.command, Some(Commands::Init));

    let store = RecordStore::open(FsBackend::new(), &file, is_init)
        .map_err(|e| match e {
            TestrecError::FileNotFound(path) => TestrecError::Api(format!(
                "{} does not exist (run `testrec init` to create it)",
                path.display()
            )),
            other => other,
        })?
        .with_max_records(config.max_records);
    let mut api = TestrecApi::new(store, paths);

    if !is_init {
        print_messages(&api.load_messages());
    }

    match cli.command {
        Some(Commands::Init) => {
            let result = api.init()?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Add {
            system_name,
            test_type,
            result,
        }) => {
            let res = api.create_record(&system_name, &test_type, &result)?;
            print_messages(&res.messages);
            Ok(())
        }
        Some(Commands::List { deleted }) => handle_list(&api, deleted),
        Some(Commands::Show { ids }) => {
            let result = api.view_records(&ids)?;
            print_records(&result.listed_records);
            Ok(())
        }
        Some(Commands::Search { term }) => {
            let result = api.search_records(&term)?;
            print_records(&result.listed_records);
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Update {
            id,
            name,
            test_type,
            result,
        }) => handle_update(&mut api, &id, name, test_type, result),
        Some(Commands::Delete { ids, yes }) => {
            let targets = api.view_records(&ids)?.listed_records;
            if !yes && !confirm("Delete these test records?", &targets)? {
                print_messages(&[CmdMessage::info("Operation cancelled.")]);
                return Ok(());
            }
            let result = api.delete_records(&ids)?;
            finish_batch(&result)
        }
        Some(Commands::Recover { ids, yes }) => {
            let targets = api.view_records(&ids)?.listed_records;
            if !yes && !confirm("Recover these test records?", &targets)? {
                print_messages(&[CmdMessage::info("Operation cancelled.")]);
                return Ok(());
            }
            let result = api.recover_records(&ids)?;
            finish_batch(&result)
        }
        Some(Commands::Purge { ids, yes }) => {
            let targets = if ids.is_empty() {
                api.list_records(true)?.listed_records
            } else {
                api.view_records(&ids)?.listed_records
            };
            if !targets.is_empty()
                && !yes
                && !confirm("This will permanently remove:", &targets)?
            {
                print_messages(&[CmdMessage::info("Operation cancelled.")]);
                return Ok(());
            }
            let result = api.purge_records(&ids)?;
            finish_batch(&result)
        }
        Some(Commands::Files { .. }) | Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&api, false),
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("TESTREC_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "testrec", "testrec")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TestrecError::Api("Could not determine config dir".into()))
}

fn handle_files(dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let result = testrec::api::data_files(&FsBackend::new(), &dir)?;
    for path in &result.files {
        println!("{}", path.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(paths: &TestrecPaths, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = testrec::api::config(paths, action)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &TestrecApi<FsBackend>, deleted: bool) -> Result<()> {
    let result = api.list_records(deleted)?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    api: &mut TestrecApi<FsBackend>,
    id: &str,
    name: Option<String>,
    test_type: Option<String>,
    result: Option<String>,
) -> Result<()> {
    let edits: Vec<FieldEdit> = [
        (Field::SystemName, name),
        (Field::TestType, test_type),
        (Field::Result, result),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| FieldEdit::new(field, v)))
    .collect();

    if edits.is_empty() {
        return Err(TestrecError::Api(
            "Nothing to change: pass --name, --type or --result".into(),
        ));
    }

    let res = api.update_record(id, &edits)?;
    print_records(&res.affected_records);
    print_messages(&res.messages);
    Ok(())
}

fn confirm(question: &str, records: &[Record]) -> Result<bool> {
    println!("{}", question);
    print_records(records);
    print!("[y/n]: ");
    io::stdout().flush().map_err(TestrecError::Io)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(TestrecError::Io)?;
    Ok(matches!(input.trim(), "y" | "Y" | "yes"))
}

/// A batch that stopped part way still printed what it did; exit non-zero.
fn finish_batch(result: &CmdResult) -> Result<()> {
    print_messages(&result.messages);
    if result.has_errors() {
        return Err(TestrecError::Api(format!(
            "stopped after {} record(s)",
            result.affected_records.len()
        )));
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

const ID_WIDTH: usize = 6;
const NAME_WIDTH: usize = 32;
const TYPE_WIDTH: usize = 20;
const RESULT_WIDTH: usize = 8;

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No test records found.");
        return;
    }

    println!(
        "{} {} {} {} {}",
        pad("ID", ID_WIDTH).bold(),
        pad("System", NAME_WIDTH).bold(),
        pad("Type", TYPE_WIDTH).bold(),
        pad("Result", RESULT_WIDTH).bold(),
        "Status".bold()
    );

    for record in records {
        let result = pad(record.result.name(), RESULT_WIDTH);
        let result = match record.result {
            TestResult::Passed | TestResult::Success => result.green(),
            TestResult::Failed => result.red(),
            TestResult::Pending => result.yellow(),
        };
        let status = if record.active {
            "active".normal()
        } else {
            "deleted".dimmed()
        };

        println!(
            "{} {} {} {} {}",
            pad(&record.id.to_string(), ID_WIDTH),
            pad(&record.system_name, NAME_WIDTH),
            pad(&record.test_type, TYPE_WIDTH),
            result,
            status
        );
    }
}

/// Truncates or right-pads `s` to exactly `width` columns.
fn pad(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width);
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
