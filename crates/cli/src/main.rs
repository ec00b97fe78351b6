use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use squares::corpus::{audit, BaselineReport};
use squares::sample::{sweep, SampleCfg, SweepTally};
use squares::{classify_all, Point, PointSet, Strategy, Verdicts};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Square detection checks and audits")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Cross-check the strategies on the fixture corpus and report baseline errors
    Audit {
        /// Print the counters as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify four points, given as `x,y`, with every strategy
    Check {
        #[arg(num_args = 4, required = true, allow_hyphen_values = true)]
        points: Vec<Point>,
        /// Only report this strategy
        #[arg(long)]
        strategy: Option<Strategy>,
    },
    /// Random squares and near-squares; tally disagreements with `distance`
    Sweep {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 10_000)]
        count: u64,
        #[arg(long, default_value_t = SampleCfg::default().span)]
        span: i32,
        #[arg(long, default_value_t = SampleCfg::default().max_side)]
        max_side: i32,
        #[arg(long, default_value_t = SampleCfg::default().perturb_frac)]
        perturb_frac: f64,
        #[arg(long, default_value_t = SampleCfg::default().max_nudge)]
        max_nudge: i32,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Audit { json } => run_audit(json),
        Action::Check { points, strategy } => check(points, strategy),
        Action::Sweep {
            seed,
            count,
            span,
            max_side,
            perturb_frac,
            max_nudge,
        } => {
            let cfg = SampleCfg {
                span,
                max_side,
                perturb_frac,
                max_nudge,
            };
            run_sweep(seed, count, cfg)
        }
    }
}

fn run_audit(json: bool) -> Result<()> {
    let report = audit().context("fixture audit failed")?;
    tracing::info!(
        cases = report.cases,
        false_positives = report.false_positives,
        false_negatives = report.false_negatives,
        "audit"
    );
    if json {
        let doc = AuditDoc {
            version: squares::VERSION,
            baseline: Strategy::GeeksForGeeks.name(),
            cases: report.cases,
            false_positives: report.false_positives,
            false_negatives: report.false_negatives,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", audit_text(&report));
    }
    Ok(())
}

fn audit_text(report: &BaselineReport) -> String {
    format!(
        "Errors in GeeksForGeeks solution:\nFalse positives: {}\nFalse negatives: {}\n",
        report.false_positives, report.false_negatives
    )
}

#[derive(Serialize)]
struct AuditDoc {
    version: &'static str,
    baseline: &'static str,
    cases: usize,
    false_positives: usize,
    false_negatives: usize,
}

fn check(points: Vec<Point>, only: Option<Strategy>) -> Result<()> {
    let points = to_point_set(points)?;
    let verdicts = classify_all(&points);
    tracing::info!(
        points = ?points,
        agree = verdicts.authoritative_agree(),
        "check"
    );
    let doc = CheckDoc::new(&verdicts, only);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn to_point_set(points: Vec<Point>) -> Result<PointSet> {
    let n = points.len();
    points
        .try_into()
        .map_err(|_: Vec<Point>| anyhow::anyhow!("expected 4 points, got {n}"))
}

#[derive(Serialize)]
struct CheckDoc {
    points: Vec<String>,
    verdicts: Vec<VerdictRow>,
    authoritative_agree: bool,
}

#[derive(Serialize)]
struct VerdictRow {
    strategy: &'static str,
    is_square: bool,
}

impl CheckDoc {
    fn new(verdicts: &Verdicts, only: Option<Strategy>) -> Self {
        Self {
            points: verdicts.points.iter().map(Point::to_string).collect(),
            verdicts: verdicts
                .iter()
                .filter(|(s, _)| only.map_or(true, |o| o == *s))
                .map(|(s, is_square)| VerdictRow {
                    strategy: s.name(),
                    is_square,
                })
                .collect(),
            authoritative_agree: verdicts.authoritative_agree(),
        }
    }
}

fn run_sweep(seed: u64, count: u64, cfg: SampleCfg) -> Result<()> {
    tracing::info!(seed, count, cfg = ?cfg, "sweep");
    let tally = sweep(seed, count, cfg).context("sweep config")?;
    tracing::info!(draws = tally.draws, squares = tally.squares, "sweep_done");
    let doc = SweepDoc::new(seed, &tally);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[derive(Serialize)]
struct SweepDoc {
    seed: u64,
    draws: u64,
    squares: u64,
    strategies: Vec<SweepRow>,
}

#[derive(Serialize)]
struct SweepRow {
    strategy: &'static str,
    false_positives: u64,
    false_negatives: u64,
}

impl SweepDoc {
    fn new(seed: u64, tally: &SweepTally) -> Self {
        Self {
            seed,
            draws: tally.draws,
            squares: tally.squares,
            strategies: Strategy::ALL
                .iter()
                .map(|s| SweepRow {
                    strategy: s.name(),
                    false_positives: tally.false_positives[s.index()],
                    false_negatives: tally.false_negatives[s.index()],
                })
                .collect(),
        }
    }
}
