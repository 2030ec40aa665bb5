use std::sync::Arc;

use log::{debug, error, warn};
use shared::{AttendanceSubmission, MonthSnapshot, WeeklySummary};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::config::AppConfig;
use crate::domain::commands::{ReconciliationOutcome, ReconciliationRequest};
use crate::domain::engine::AttendanceEngine;
use crate::domain::models::{EmployeeId, EngineError, LoadToken};
use crate::storage::AttendanceStore;

use super::events::EngineEvent;

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<EngineEvent>,
}

enum Command {
    ChangeMonth {
        month: u32,
        year: i32,
        resp: oneshot::Sender<Result<LoadToken, EngineError>>,
    },
    ToggleDay {
        index: usize,
        resp: oneshot::Sender<Result<bool, EngineError>>,
    },
    Submit {
        resp: oneshot::Sender<Result<AttendanceSubmission, EngineError>>,
    },
    Snapshot {
        resp: oneshot::Sender<Option<MonthSnapshot>>,
    },
    WeeklySummaries {
        resp: oneshot::Sender<Vec<WeeklySummary>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Result of a background fetch, posted back onto the engine loop
struct FetchCompleted {
    token: LoadToken,
    result: anyhow::Result<Vec<String>>,
}

/// Start the engine loop for `employee_id`.
///
/// Fails with [`EngineError::MissingSession`] when there is no employee.
/// Must be called from within a tokio runtime.
pub fn spawn_engine(
    store: Arc<dyn AttendanceStore>,
    employee_id: Option<EmployeeId>,
    config: &AppConfig,
) -> Result<EngineHandle, EngineError> {
    let mut engine = AttendanceEngine::new();
    engine.initialize(employee_id)?;

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.event_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<EngineEvent>(config.event_broadcast_capacity.max(1));
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchCompleted>();

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    let done = handle_command(
                        cmd,
                        &mut engine,
                        &store,
                        &events_tx_loop,
                        &done_tx,
                    ).await;

                    if done {
                        break;
                    }
                }
                Some(completed) = done_rx.recv() => {
                    handle_fetch_completed(completed, &mut engine, &events_tx_loop);
                }
            }
        }
        debug!("Engine loop stopped");
    });

    Ok(EngineHandle { cmd_tx, events_tx })
}

async fn handle_command(
    cmd: Command,
    engine: &mut AttendanceEngine,
    store: &Arc<dyn AttendanceStore>,
    events: &broadcast::Sender<EngineEvent>,
    done_tx: &mpsc::UnboundedSender<FetchCompleted>,
) -> bool {
    match cmd {
        Command::ChangeMonth { month, year, resp } => {
            let result = engine.begin_month_change(month, year).map(|request| {
                let _ = events.send(EngineEvent::MonthRebuilt {
                    token: request.token,
                    month,
                    year,
                });
                spawn_fetch(Arc::clone(store), request, done_tx.clone());
                request.token
            });
            let _ = resp.send(result);
        }
        Command::ToggleDay { index, resp } => {
            let result = engine.toggle_day(index);
            if let Ok(true) = result {
                let _ = events.send(EngineEvent::DayToggled {
                    index,
                    worked_days: engine.monthly_worked_days(),
                });
            }
            let _ = resp.send(result);
        }
        Command::Submit { resp } => {
            let result = submit(engine, store.as_ref()).await;
            match &result {
                Ok(submission) => {
                    let _ = events.send(EngineEvent::Submitted {
                        month: submission.month,
                        year: submission.year,
                        worked_days: submission.worked_days,
                    });
                }
                Err(EngineError::SubmissionFailed { source, .. }) => {
                    let _ = events.send(EngineEvent::SubmissionFailed {
                        message: format!("{:#}", source),
                    });
                }
                Err(_) => {}
            }
            let _ = resp.send(result);
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(engine.snapshot());
        }
        Command::WeeklySummaries { resp } => {
            let _ = resp.send(engine.weekly_summaries());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }
    false
}

fn handle_fetch_completed(
    completed: FetchCompleted,
    engine: &mut AttendanceEngine,
    events: &broadcast::Sender<EngineEvent>,
) {
    let FetchCompleted { token, result } = completed;
    match engine.apply_reconciliation(token, result) {
        Ok(ReconciliationOutcome::Applied { worked_days }) => {
            let _ = events.send(EngineEvent::Reconciled { token, worked_days });
        }
        Ok(ReconciliationOutcome::Stale) => {}
        Err(EngineError::ReconciliationFailed { month, year, source }) => {
            let _ = events.send(EngineEvent::ReconciliationFailed {
                token,
                month,
                year,
                message: format!("{:#}", source),
            });
        }
        Err(err) => warn!("Unexpected reconciliation error for {}: {}", token, err),
    }
}

fn spawn_fetch(
    store: Arc<dyn AttendanceStore>,
    request: ReconciliationRequest,
    done_tx: mpsc::UnboundedSender<FetchCompleted>,
) {
    tokio::spawn(async move {
        let result = store
            .fetch_persisted_dates(request.employee_id, request.month, request.year)
            .await;
        // the loop is gone after shutdown; nothing left to update
        let _ = done_tx.send(FetchCompleted {
            token: request.token,
            result,
        });
    });
}

async fn submit(
    engine: &AttendanceEngine,
    store: &dyn AttendanceStore,
) -> Result<AttendanceSubmission, EngineError> {
    let (employee_id, submission) = engine.prepare_submission()?;
    store
        .submit_attendance(employee_id, &submission)
        .await
        .map_err(|source| {
            error!("Submitting attendance for employee {} failed: {:#}", employee_id, source);
            EngineError::SubmissionFailed { employee_id, source }
        })?;
    Ok(submission)
}

impl EngineHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events_tx.subscribe()
    }

    /// Rebuild the grid for a new month and start loading its saved dates.
    ///
    /// Returns once the grid is rebuilt; reconciliation completes later and
    /// is reported on the event stream.
    pub async fn change_month(&self, month: u32, year: i32) -> Result<LoadToken, EngineError> {
        self.request(|resp| Command::ChangeMonth { month, year, resp }).await?
    }

    pub async fn toggle_day(&self, index: usize) -> Result<bool, EngineError> {
        self.request(|resp| Command::ToggleDay { index, resp }).await?
    }

    /// Validate and send the current month to the attendance store.
    /// The selection is left as is whatever the outcome.
    pub async fn submit(&self) -> Result<AttendanceSubmission, EngineError> {
        self.request(|resp| Command::Submit { resp }).await?
    }

    pub async fn snapshot(&self) -> Result<Option<MonthSnapshot>, EngineError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    pub async fn weekly_summaries(&self) -> Result<Vec<WeeklySummary>, EngineError> {
        self.request(|resp| Command::WeeklySummaries { resp }).await
    }

    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(command(tx))
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        rx.await.map_err(|_| EngineError::ChannelClosed)
    }
}
