use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use match_scheduler::display::{print_outcome, print_schedule, write_outcome_json, write_schedule_to_file};
use match_scheduler::parser::load_roster;
use match_scheduler::runner::{spawn_solver, WorkerMessage};
use match_scheduler::{EmptySlotPolicy, SchedulerParams, SolverEvent};

#[derive(Parser, Debug)]
#[command(name = "match-scheduler")]
#[command(about = "Plans matches and teams from an availability sheet")]
struct Args {
    /// Availability CSV: name, skill, then one column per date
    #[arg(env = "SCHEDULE_INPUT")]
    input: PathBuf,

    /// JSON file with solver parameters
    #[arg(long, env = "SCHEDULE_PARAMS")]
    params: Option<PathBuf>,

    /// People per match
    #[arg(long)]
    capacity: Option<usize>,

    /// Minimum summed skill of a full match
    #[arg(long)]
    min_skill_sum: Option<u32>,

    /// Cap for the per-person minimum number of matches
    #[arg(long)]
    min_matches: Option<usize>,

    /// Leave dates without enough available people empty instead of failing
    #[arg(long)]
    allow_empty_slots: bool,

    /// Seed for team tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many seconds and keep the best schedule so far
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write the best schedule as CSV
    #[arg(long, default_value = "schedule.csv")]
    output: PathBuf,

    /// Also write the full outcome as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print every progress message as a JSON line
    #[arg(long)]
    events: bool,
}

impl Args {
    fn scheduler_params(&self) -> Result<SchedulerParams, Box<dyn std::error::Error>> {
        let mut params = match &self.params {
            Some(path) => SchedulerParams::from_json_file(path)?,
            None => SchedulerParams::default(),
        };
        if let Some(capacity) = self.capacity {
            params.capacity = capacity;
        }
        if let Some(min_skill_sum) = self.min_skill_sum {
            params.min_skill_sum = min_skill_sum;
        }
        if let Some(min_matches) = self.min_matches {
            params.min_matches_cap = min_matches;
        }
        if self.allow_empty_slots {
            params.empty_slot_policy = EmptySlotPolicy::AllowUnfillable;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        params.check()?;
        Ok(params)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let params = args.scheduler_params()?;

    println!("Loading availability from {}...", args.input.display());
    let roster = load_roster(&args.input)?;
    println!(
        "Loaded {} people and {} dates",
        roster.names.len(),
        roster.input.dates.len()
    );

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C, keeping the best schedule so far");
            ctrl_c_token.cancel();
        }
    });
    if let Some(secs) = args.timeout_secs {
        let timeout_token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            tracing::info!(secs, "Timeout reached, stopping search");
            timeout_token.cancel();
        });
    }

    let mut handle = spawn_solver(roster.input.clone(), params, cancel)?;
    while let Some(event) = handle.events.recv().await {
        if args.events {
            println!("{}", serde_json::to_string(&WorkerMessage::from_event(&event)?)?);
        } else if let SolverEvent::Improved(solution) = &event {
            println!("Found better schedule, score {:.3}", solution.score);
        }
    }
    let outcome = handle.task.await??;

    print_outcome(&outcome);
    if let Some(best) = &outcome.best {
        println!();
        print_schedule(&roster, best);

        write_schedule_to_file(&args.output, &roster, best)?;
        println!("\nSchedule saved to {}", args.output.display());
    }
    if let Some(path) = &args.json {
        write_outcome_json(path, &outcome)?;
        println!("Outcome saved to {}", path.display());
    }

    Ok(())
}
