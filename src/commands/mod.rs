use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};

use crate::adapters::{writer_for, TomlConfigStore};
use crate::app::{builtin_reports, select, AppController, ReportRunner};
use crate::cli::{Cli, Commands, ConfigAction, RunArgs};
use crate::domain::config::ApiToken;
use crate::domain::{AppConfig, ReportResult};
use crate::ports::ConfigStore;

/// Exit status when a report failed, or warned under `--fail-on-warning`.
const EXIT_FINDINGS: u8 = 2;

/// Dispatch a parsed command line.
pub async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => run(cli.config, cli.log_level.as_deref(), args).await,
        Commands::List => list(),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => config_init(cli.config, force),
            ConfigAction::Show => config_show(cli.config, cli.log_level.as_deref()),
        },
    }
}

async fn run(config_path: Option<PathBuf>, log_level: Option<&str>, args: RunArgs) -> anyhow::Result<ExitCode> {
    let mut controller = AppController::new(config_path, log_level)?;
    if !args.statuses.is_empty() {
        controller.config_mut().checks.eligible_statuses = args.statuses.into_iter().collect();
    }

    let reports = builtin_reports();
    let selections = select(&args.reports, &reports)?;

    let inventory = controller
        .inventory(args.snapshot.as_deref())
        .context("Failed to open inventory")?;
    let runner = ReportRunner::new(inventory, controller.config().checks.clone());

    let results = runner
        .run_selected(&reports, &selections)
        .await
        .context("Report run aborted")?;

    let format = args.format.unwrap_or(controller.config().output.format);
    let mut stdout = std::io::stdout().lock();
    writer_for(format).write(&results, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::from(exit_status(&results, args.fail_on_warning)))
}

fn exit_status(results: &[ReportResult], fail_on_warning: bool) -> u8 {
    let failed = results.iter().any(|r| r.failed);
    let warned = results.iter().any(|r| r.totals().warning > 0);

    if failed || (fail_on_warning && warned) {
        EXIT_FINDINGS
    } else {
        0
    }
}

fn list() -> anyhow::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    for report in builtin_reports() {
        writeln!(stdout, "{}: {}", report.name, report.description)?;
        for test in report.test_names() {
            writeln!(stdout, "  {}.{}", report.name, test)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn config_init(config_path: Option<PathBuf>, force: bool) -> anyhow::Result<ExitCode> {
    let store = TomlConfigStore::new(config_path)?;
    let path = store.config_path();
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    store.save(&AppConfig::new())?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn config_show(config_path: Option<PathBuf>, log_level: Option<&str>) -> anyhow::Result<ExitCode> {
    let controller = AppController::new(config_path, log_level)?;
    let rendered = render_redacted(controller.config())?;
    print!("{}", rendered);
    Ok(ExitCode::SUCCESS)
}

fn render_redacted(config: &AppConfig) -> anyhow::Result<String> {
    let mut shown = config.clone();
    if !shown.netbox.token.is_empty() {
        shown.netbox.token = ApiToken::new("<redacted>");
    }
    toml::to_string_pretty(&shown).context("Failed to render configuration")
}
