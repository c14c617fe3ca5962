//! Runs the solver on a blocking thread and streams its events.
//!
//! The engine never waits on the receiver: events go into an unbounded
//! channel, and a dropped receiver is ignored.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::SchedulerParams;
use crate::error::Result;
use crate::schedule::{Outcome, ScheduleInput, SolveStatus, Solver, SolverEvent};

/// A running solver
pub struct SolverHandle {
    pub events: mpsc::UnboundedReceiver<SolverEvent>,
    pub task: JoinHandle<Result<Outcome>>,
    pub cancel: CancellationToken,
}

/// Validates the input right away, then starts the search in the background.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_solver(
    input: ScheduleInput,
    params: SchedulerParams,
    cancel: CancellationToken,
) -> Result<SolverHandle> {
    let solver = Solver::new(input, params)?;
    let (tx, events) = mpsc::unbounded_channel();

    let token = cancel.clone();
    let task = tokio::task::spawn_blocking(move || {
        solver.solve(&token, |event| {
            if tx.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        })
    });

    Ok(SolverHandle {
        events,
        task,
        cancel,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatus {
    /// Still searching; content holds the latest improvement
    Solving,
    /// Finished with a schedule
    Solved,
    /// Finished without any schedule
    Unsolvable,
    /// Stopped early; content holds the best schedule, if any
    Cancelled,
}

/// Serializable progress message: status, score and the schedule as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerMessage {
    pub status: WorkerStatus,
    pub score: f64,
    pub content: String,
}

impl WorkerMessage {
    pub fn from_event(event: &SolverEvent) -> Result<Self> {
        let message = match event {
            SolverEvent::Improved(solution) => WorkerMessage {
                status: WorkerStatus::Solving,
                score: solution.score,
                content: serde_json::to_string(&solution.schedule)?,
            },
            SolverEvent::Finished(outcome) => {
                let status = match outcome.status {
                    SolveStatus::Success => WorkerStatus::Solved,
                    SolveStatus::NoSolution => WorkerStatus::Unsolvable,
                    SolveStatus::Cancelled => WorkerStatus::Cancelled,
                };
                let (score, content) = match &outcome.best {
                    Some(best) => (best.score, serde_json::to_string(&best.schedule)?),
                    None => (0.0, String::new()),
                };
                WorkerMessage {
                    status,
                    score,
                    content,
                }
            }
        };
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CellState, Solution};

    #[test]
    fn test_message_from_improvement() {
        let event = SolverEvent::Improved(Solution {
            score: 1.5,
            schedule: vec![vec![CellState::TeamOne, CellState::Substitute]],
        });
        let message = WorkerMessage::from_event(&event).unwrap();
        assert_eq!(message.status, WorkerStatus::Solving);
        assert_eq!(message.score, 1.5);
        assert_eq!(message.content, r#"[["TeamOne","Substitute"]]"#);
    }

    #[test]
    fn test_message_without_solution() {
        let event = SolverEvent::Finished(Outcome {
            status: SolveStatus::NoSolution,
            best: None,
            iterations: 3,
            solutions_found: 0,
        });
        let message = WorkerMessage::from_event(&event).unwrap();
        assert_eq!(message.status, WorkerStatus::Unsolvable);
        assert!(message.content.is_empty());
    }

    #[tokio::test]
    async fn test_spawned_solver_streams_events() {
        let input = ScheduleInput {
            availability: vec![vec![true]; 8],
            skills: vec![1; 8],
            dates: vec!["01.10.22".to_string()],
        };
        let mut handle =
            spawn_solver(input, SchedulerParams::default(), CancellationToken::new()).unwrap();

        let mut received = Vec::new();
        while let Some(event) = handle.events.recv().await {
            received.push(event);
        }
        let outcome = handle.task.await.unwrap().unwrap();

        assert_eq!(outcome.status, SolveStatus::Success);
        assert_eq!(received.len(), 2);
        assert_eq!(received[1], SolverEvent::Finished(outcome));
    }

    #[tokio::test]
    async fn test_spawn_rejects_bad_input() {
        let input = ScheduleInput {
            availability: vec![],
            skills: vec![],
            dates: vec![],
        };
        assert!(spawn_solver(input, SchedulerParams::default(), CancellationToken::new()).is_err());
    }
}
