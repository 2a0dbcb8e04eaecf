//! Command line front end answering closest common manager lookups.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use orgtree::service::{closest_common_manager, STATUS_OK};
use orgtree::{AllPairs, BinaryLifting, Finder, Node, OrgTree, SharedFinder};
use serde::Deserialize;

/// Line that triggers a configuration reload in `serve` mode.
const RELOAD: &str = ":reload";

#[derive(Parser, Debug)]
#[command(name = "orgtree", about = "Closest common manager lookups", version)]
struct Args {
    /// Organisation chart as nested `{"name", "employees"}` JSON records
    #[arg(long, env = "CONFIG_FILE", default_value = "./default_config.json")]
    config: PathBuf,

    /// Algorithm answering `query` and `serve` lookups
    #[arg(long, value_enum, default_value_t = Engine::Tarjan)]
    engine: Engine,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the closest common manager of every pair of employees
    Pairs,
    /// Answer one lookup with a JSON envelope
    Query {
        /// One or two employee keys, delimited by comma
        #[arg(value_name = "EMPLOYEES")]
        employees: String,
    },
    /// Answer one lookup per line of standard input. The line `:reload`
    /// re-reads the configuration.
    Serve,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Engine {
    /// Offline Tarjan table over every pair
    Tarjan,
    /// Binary lifting, for large organisations
    Lifting,
}

type DynFinder = Box<dyn Finder + Send + Sync>;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let tree = load_tree(&args.config)?;
    let mut out = io::stdout().lock();

    match args.command {
        Command::Pairs => {
            print_pairs(&AllPairs::new(tree), &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Query { employees } => {
            let finder = build_finder(args.engine, tree);
            if query(&finder, &employees, &mut out)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Serve => {
            let shared = SharedFinder::new(build_finder(args.engine, tree));
            serve(&shared, io::stdin().lock(), &mut out, || {
                load_tree(&args.config).map(|tree| build_finder(args.engine, tree))
            })?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_tree(path: &Path) -> Result<OrgTree> {
    eprintln!("Read data from file: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Couldn't open config file {}", path.display()))?;
    let root = read_config(BufReader::new(file))
        .with_context(|| format!("Couldn't parse data from file {}", path.display()))?;
    let tree = OrgTree::new(&root)
        .with_context(|| format!("Invalid organisation in {}", path.display()))?;

    eprintln!(
        "Data loaded. The CEO is {}. {} employees.",
        tree.key(tree.root()),
        tree.node_count()
    );
    Ok(tree)
}

/// Parses a nested organisation chart of any depth.
fn read_config(reader: impl Read) -> Result<Node> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();
    let root = Node::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(root)
}

fn build_finder(engine: Engine, tree: OrgTree) -> DynFinder {
    match engine {
        Engine::Tarjan => Box::new(AllPairs::new(tree)),
        Engine::Lifting => Box::new(BinaryLifting::new(tree)),
    }
}

fn print_pairs(pairs: &AllPairs, mut out: impl Write) -> io::Result<()> {
    for (a, b, manager) in pairs.sorted_pairs() {
        writeln!(out, "LCA between {a} and {b} is {manager}")?;
    }
    Ok(())
}

/// Writes the reply envelope for one lookup. Returns whether it succeeded.
fn query(finder: &impl Finder, employees: &str, mut out: impl Write) -> Result<bool> {
    let reply = closest_common_manager(finder, Some(employees));
    writeln!(out, "{}", serde_json::to_string(&reply.body)?)?;
    Ok(reply.status == STATUS_OK)
}

/// Answers one lookup per input line until the input ends.
///
/// The [`RELOAD`] line swaps in the finder built by `reload`. When that
/// fails, the current finder keeps serving.
fn serve<F: Finder>(
    shared: &SharedFinder<F>,
    input: impl BufRead,
    mut out: impl Write,
    mut reload: impl FnMut() -> Result<F>,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Couldn't read from standard input")?;

        if line == RELOAD {
            match reload() {
                Ok(finder) => {
                    shared.replace(finder);
                    eprintln!("Configuration reloaded.");
                }
                Err(e) => eprintln!("Reload failed, keeping the previous data: {e:#}"),
            }
            continue;
        }

        let finder = shared.load();
        query(&finder, &line, &mut out)?;
        out.flush()?;
    }
    Ok(())
}
