use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use attendance_backend::{
    spawn_engine, AppConfig, CalendarService, EmployeeId, EngineEvent, InMemoryAttendanceStore,
    LoadToken,
};
use chrono::Datelike;
use clap::Parser;
use serde::Serialize;
use shared::{AttendanceSubmission, MonthSnapshot, WeeklySummary};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Mark worked days for a month and print the resulting attendance figures
#[derive(Debug, Parser)]
#[command(name = "attendance-cli", version)]
struct Cli {
    /// Employee whose attendance is edited
    #[arg(long)]
    employee_id: Option<i64>,

    /// Month to display (1-12), defaults to the current month
    #[arg(long)]
    month: Option<u32>,

    /// Year to display, defaults to the current year
    #[arg(long)]
    year: Option<i32>,

    /// Dates already recorded as worked (YYYY-MM-DD), comma separated
    #[arg(long, value_delimiter = ',')]
    persisted: Vec<String>,

    /// Days of the month to toggle after loading, comma separated
    #[arg(long, value_delimiter = ',')]
    toggle: Vec<u32>,

    /// Submit the month after applying the toggles
    #[arg(long)]
    submit: bool,

    /// Optional YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    years: Vec<i32>,
    snapshot: MonthSnapshot,
    weeks: Vec<WeeklySummary>,
    submission: Option<AttendanceSubmission>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let calendar = CalendarService::new();
    let today = calendar.today();
    let month = cli.month.unwrap_or_else(|| today.month());
    let year = cli.year.unwrap_or_else(|| today.year());
    let employee_id = cli.employee_id.map(EmployeeId);

    let store = Arc::new(InMemoryAttendanceStore::new());
    if let Some(employee_id) = employee_id {
        if !cli.persisted.is_empty() {
            store.seed(employee_id, month, year, cli.persisted.clone()).await;
        }
    }

    let handle = spawn_engine(store, employee_id, &config)?;
    let mut events = handle.subscribe();

    let token = handle.change_month(month, year).await?;
    wait_for_reconciliation(&mut events, token).await?;

    let snapshot = handle
        .snapshot()
        .await?
        .ok_or_else(|| anyhow!("No month is displayed"))?;
    let leading = snapshot.first_day_of_week as usize;

    for day in &cli.toggle {
        if *day == 0 || *day > snapshot.total_days {
            warn!("Day {} is not in {}/{}; skipped", day, month, year);
            continue;
        }
        if !handle.toggle_day(leading + *day as usize - 1).await? {
            warn!("Day {} is not a working day; ignored", day);
        }
    }

    let submission = if cli.submit {
        let submission = handle.submit().await?;
        info!(
            "Submitted {} worked days for {}/{}",
            submission.worked_days, submission.month, submission.year
        );
        Some(submission)
    } else {
        None
    };

    let report = Report {
        years: calendar.selectable_years(today.year(), &config),
        snapshot: handle
            .snapshot()
            .await?
            .ok_or_else(|| anyhow!("No month is displayed"))?,
        weeks: handle.weekly_summaries().await?,
        submission,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    handle.shutdown().await?;
    Ok(())
}

/// Wait until the fetch started for `token` has been applied or has failed
async fn wait_for_reconciliation(
    events: &mut broadcast::Receiver<EngineEvent>,
    token: LoadToken,
) -> Result<()> {
    loop {
        match events.recv().await {
            Ok(EngineEvent::Reconciled { token: applied, worked_days }) if applied == token => {
                info!("Loaded {} saved worked days", worked_days);
                return Ok(());
            }
            Ok(EngineEvent::ReconciliationFailed { token: failed, message, .. }) if failed == token => {
                warn!("Could not load saved attendance, starting empty: {}", message);
                return Ok(());
            }
            Ok(_) | Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => return Err(anyhow!("Engine stopped before loading finished")),
        }
    }
}
