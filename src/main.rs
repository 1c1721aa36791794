//! Map inspection CLI.
//!
//! Parses a vector map and prints one line per province.
//!
//! Usage:
//!   cartographer [OPTIONS] <map.svg>
//!
//! Options:
//!   --config FILE      Map configuration JSON (default: built-in defaults)
//!   --overrides FILE   Override table JSON, may be repeated
//!   --margin M         Adjacency margin, overrides the config value
//!   --sequential       Detect adjacency on one thread
//!   --quiet            Print only the summary line
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use cartographer::board::Board;
use cartographer::{parse_map_file, MapConfig, MapError, OverrideHook, OverrideTable};

struct Args {
    map: PathBuf,
    config: Option<PathBuf>,
    overrides: Vec<PathBuf>,
    margin: Option<f64>,
    sequential: bool,
    quiet: bool,
}

fn main() {
    env_logger::init();

    let args = parse_args();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn parse_args() -> Args {
    let argv: Vec<String> = env::args().collect();
    let mut map = None;
    let mut config = None;
    let mut overrides = Vec::new();
    let mut margin = None;
    let mut sequential = false;
    let mut quiet = false;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--config" => {
                i += 1;
                config = Some(PathBuf::from(value(&argv, i, "--config")));
            }
            "--overrides" => {
                i += 1;
                overrides.push(PathBuf::from(value(&argv, i, "--overrides")));
            }
            "--margin" => {
                i += 1;
                match value(&argv, i, "--margin").parse() {
                    Ok(m) => margin = Some(m),
                    Err(_) => usage_error("invalid --margin value"),
                }
            }
            "--sequential" => sequential = true,
            "--quiet" => quiet = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with("--") => {
                usage_error(&format!("unknown argument: {}", other));
            }
            path => {
                if map.is_some() {
                    usage_error("only one map file may be given");
                }
                map = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let Some(map) = map else {
        usage_error("no map file given")
    };
    Args {
        map,
        config,
        overrides,
        margin,
        sequential,
        quiet,
    }
}

fn value<'a>(argv: &'a [String], i: usize, flag: &str) -> &'a str {
    match argv.get(i) {
        Some(v) => v,
        None => usage_error(&format!("{} needs a value", flag)),
    }
}

fn usage_error(msg: &str) -> ! {
    eprintln!("{}", msg);
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: cartographer [OPTIONS] <map.svg>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE      Map configuration JSON");
    eprintln!("  --overrides FILE   Override table JSON, may be repeated");
    eprintln!("  --margin M         Adjacency margin");
    eprintln!("  --sequential       Detect adjacency on one thread");
    eprintln!("  --quiet            Print only the summary line");
}

fn run(args: &Args) -> Result<(), MapError> {
    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    if let Some(margin) = args.margin {
        config.adjacency_margin = margin;
    }
    if args.sequential {
        config.parallel_adjacency = false;
    }

    let tables = args
        .overrides
        .iter()
        .map(|p| OverrideTable::load(p))
        .collect::<Result<Vec<_>, _>>()?;
    let hooks: Vec<&dyn OverrideHook> = tables.iter().map(|t| t as &dyn OverrideHook).collect();

    let board = parse_map_file(&args.map, &config, &hooks)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if !args.quiet {
        print_provinces(&mut out, &board)?;
    }
    writeln!(
        out,
        "{} provinces, {} adjacencies, {} supply centers, {} units; {}",
        board.map.len(),
        board.map.edge_count(),
        board.supply_center_count(),
        board.units().len(),
        board.turn
    )?;
    out.flush()?;
    Ok(())
}

fn print_provinces(out: &mut impl Write, board: &Board) -> io::Result<()> {
    let mut provinces: Vec<_> = board.map.provinces().collect();
    provinces.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

    for (_, p) in provinces {
        let owner = p.owner.map(|o| board.player(o).name.as_str()).unwrap_or("-");
        let occupant = match p.occupant {
            Some(u) => {
                let unit = board.map.unit(u);
                let coast = unit.coast.as_deref().map(|c| format!(" ({})", c)).unwrap_or_default();
                format!("{} {}{}", unit.unit_type.abbr(), board.player(unit.owner).name, coast)
            }
            None => "-".to_string(),
        };
        let mut neighbors: Vec<&str> = p
            .adjacent
            .iter()
            .map(|id| board.map.province(*id).name.as_str())
            .collect();
        neighbors.sort_unstable();

        write!(
            out,
            "{:<24} {:<6} {} owner={} unit={} adj=[{}]",
            p.name,
            p.province_type.name(),
            if p.has_supply_center { "*" } else { " " },
            owner,
            occupant,
            neighbors.join(", ")
        )?;
        for coast in &p.coasts {
            let mut reach: Vec<&str> = coast
                .adjacent
                .iter()
                .map(|id| board.map.province(*id).name.as_str())
                .collect();
            reach.sort_unstable();
            write!(out, " {}=[{}]", coast.suffix, reach.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
