use std::env;
use std::process;

use dijkstra_steiner::io::{format_instance, read_instance};
use dijkstra_steiner::{solve, BoundingBoxBound, LowerBound, Settings, ZeroBound};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("steinertree: {err}");
            Options::print_help();
            process::exit(2);
        }
    };

    let mut instance = match read_instance(&options.path) {
        Ok(instance) => instance,
        Err(err) => {
            eprintln!("steinertree: {}: {err}", options.path);
            process::exit(1);
        }
    };
    if options.settings.dominance_pruning {
        instance.apply_dominance_pruning();
    }
    print!("{}", format_instance(&instance));

    let bound: &dyn LowerBound = match options.bound {
        BoundKind::Zero => &ZeroBound,
        BoundKind::BoundingBox => &BoundingBoxBound,
    };
    match solve(&instance, &options.settings, bound) {
        Ok(solution) => {
            eprintln!(
                "extracted={} created={} peak_open={}",
                solution.stats.extracted, solution.stats.created, solution.stats.peak_open
            );
            println!("{}", solution.length);
        }
        Err(err) => {
            eprintln!("steinertree: {err}");
            process::exit(1);
        }
    }
}

#[derive(Copy, Clone)]
enum BoundKind {
    Zero,
    BoundingBox,
}

impl BoundKind {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "zero" => Ok(Self::Zero),
            "bbox" => Ok(Self::BoundingBox),
            other => Err(format!("unknown lower bound '{other}'")),
        }
    }
}

struct Options {
    path: String,
    bound: BoundKind,
    settings: Settings,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut path = None;
        let mut bound = BoundKind::BoundingBox;
        let mut settings = Settings::default();

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--lower-bound=") {
                bound = BoundKind::from_str(value)?;
            } else if arg == "--lower-bound" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --lower-bound".to_string())?
                    .into();
                bound = BoundKind::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--layer-width=") {
                settings.layer_width = Some(parse_width(value)?);
            } else if arg == "--layer-width" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --layer-width".to_string())?
                    .into();
                settings.layer_width = Some(parse_width(&value)?);
            } else if arg == "--small-memory" {
                settings.small_memory_mode = true;
            } else if arg == "--no-prune" {
                settings.dominance_pruning = false;
            } else if arg.starts_with('-') {
                return Err(format!("unrecognized argument '{arg}'"));
            } else if path.is_none() {
                path = Some(arg);
            } else {
                return Err(format!("unexpected extra argument '{arg}'"));
            }
        }

        Ok(Self {
            path: path.ok_or_else(|| "missing instance file".to_string())?,
            bound,
            settings,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: steinertree <file> [options]

Options:
  --lower-bound <zero|bbox>     Heap ordering bound (default: bbox)
  --layer-width <N>             Bits per subset-store layer (default: automatic)
  --small-memory                Recycle open-state records once closed
  --no-prune                    Skip dominance pruning
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_width(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "layer width must be a positive integer".to_string())
}
