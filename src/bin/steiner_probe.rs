use std::env;
use std::time::Instant;

use dijkstra_steiner::{solve_terminals, BoundingBoxBound, Coord, Settings, ZeroBound};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("steiner_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Dijkstra-Steiner Scaling Probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Solves pseudo-random rectilinear Steiner instances of growing terminal");
    eprintln!("count with the bounding-box bound and dominance pruning, and checks the");
    eprintln!(
        "length against an unpruned zero-bound run up to {} terminals.",
        options.verify_limit
    );
    eprintln!();
    eprintln!("  • wall_s: wall-clock time of the pruned bounding-box solve");
    eprintln!("  • rss_delta_kib: resident memory growth across the solve");
    eprintln!("  • status: 'passed' = matches oracle, 'not_checked' = above verify limit");
    eprintln!();
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/2] Planar instances (2 axes)...");
    measurements.extend(run_scenario("planar", 2, PLANAR_COUNTS, &options, &mut sys));
    eprintln!();

    eprintln!("[2/2] Spatial instances (3 axes)...");
    measurements.extend(run_scenario("spatial", 3, SPATIAL_COUNTS, &options, &mut sys));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("steiner_probe output error: {err}");
        std::process::exit(1);
    }
}

const PLANAR_COUNTS: &[usize] = &[3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
const SPATIAL_COUNTS: &[usize] = &[3, 4, 5, 6, 7, 8, 9];

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    seed: u64,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 7usize;
        let mut seed = 1u64;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_count(value, "verify limit")?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_count(&value, "verify limit")?;
            } else if let Some(value) = arg.strip_prefix("--seed=") {
                seed = parse_count(value, "seed")? as u64;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
            seed,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --release --bin steiner_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest terminal count checked against the oracle (default: 7)
  --seed=<N>                    Instance generator seed (default: 1)
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_count(value: &str, what: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a non-negative integer"))
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    size_desc: String,
    length: u64,
    extracted: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn run_scenario(
    scenario: &'static str,
    dimension: usize,
    counts: &[usize],
    options: &Options,
    sys: &mut System,
) -> Vec<Measurement> {
    let total = counts.len();
    counts
        .iter()
        .enumerate()
        .map(|(idx, &count)| {
            eprint!("      [{}/{}] Testing {} terminals... ", idx + 1, total, count);
            let seed = options.seed ^ ((dimension as u64) << 32) ^ count as u64;
            let terminals = scattered_terminals(seed, count, dimension);
            let m = measure(scenario, format!("terminals={count}"), sys, || {
                let fast = solve_terminals(&terminals, &Settings::default(), &BoundingBoxBound);
                let (length, extracted) = match &fast {
                    Ok(tree) => (tree.length, tree.stats.extracted),
                    Err(_) => (0, 0),
                };
                let verification = match fast {
                    Err(err) => (VerificationStatus::Failed, Some(err.to_string())),
                    Ok(_) if count > options.verify_limit => (VerificationStatus::NotChecked, None),
                    Ok(tree) => {
                        let oracle_settings = Settings {
                            dominance_pruning: false,
                            ..Settings::default()
                        };
                        match solve_terminals(&terminals, &oracle_settings, &ZeroBound) {
                            Ok(oracle) if oracle.length == tree.length => {
                                (VerificationStatus::Passed, None)
                            }
                            Ok(oracle) => (
                                VerificationStatus::Failed,
                                Some(format!("expected {}, got {}", oracle.length, tree.length)),
                            ),
                            Err(err) => (VerificationStatus::Failed, Some(err.to_string())),
                        }
                    }
                };
                (length, extracted, verification)
            });
            eprintln!(
                "{} length={}, extracted={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                m.length,
                m.extracted,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Test Summary");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    let total = measurements.len().max(1) as f64;
    eprintln!("Verification Results:");
    eprintln!("  Total runs: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total);
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total);
    eprintln!(
        "  ○ Not checked (terminals > {}): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        100.0 * not_checked as f64 / total
    );
    eprintln!();

    if failed > 0 {
        eprintln!("Failed Runs:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {}", detail);
                }
            }
        }
        eprintln!();
    }
}

fn measure<F>(scenario: &'static str, size_desc: String, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> (u64, usize, (VerificationStatus, Option<String>)),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (length, extracted, (status, detail)) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        length,
        extracted,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,length,extracted,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.length,
            m.extracted,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let mut col1 = "scenario".len();
    let mut col2 = "size".len();
    for m in measurements {
        col1 = col1.max(m.scenario.len());
        col2 = col2.max(m.size_desc.len());
    }

    println!(
        "{:<col1$}  {:<col2$}  {:>8}  {:>10}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "size", "length", "extracted", "wall_s", "rss_delta_kib", "status",
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<8}  {:-<10}  {:-<10}  {:-<14}  {:-<12}  {:-<12}",
        "", "", "", "", "", "", "", "",
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>8}  {:>10}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.length,
            m.extracted,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"length\":{},\"extracted\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.length,
            m.extracted,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}

/// Distinct pseudo-random points on a 0..50 lattice from a 64-bit LCG.
fn scattered_terminals(seed: u64, count: usize, dimension: usize) -> Vec<Vec<Coord>> {
    const SPAN: u64 = 50;
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % SPAN) as Coord
    };
    let mut terminals: Vec<Vec<Coord>> = Vec::with_capacity(count);
    while terminals.len() < count {
        let point: Vec<Coord> = (0..dimension).map(|_| next()).collect();
        if !terminals.contains(&point) {
            terminals.push(point);
        }
    }
    terminals
}
