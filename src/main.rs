use clap::{Parser, Subcommand, ValueEnum};
use env_logger::TimestampPrecision;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cube_ida::cube333::solver::move_tables::CornerMoveTable;
use cube_ida::cube333::solver::prune::CornerPruningTable;
use cube_ida::cube333::solver::{SearchConfig, Solver, Target};
use cube_ida::cube333::CubieCube;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Finds optimal solutions to 3x3x3 cube states.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The corner pattern database. Generated and written here if it doesn't exist.
    #[arg(long, short = 't', default_value = "corners.prune")]
    table: PathBuf,

    /// The longest solution to look for.
    #[arg(long, default_value_t = 20)]
    max_depth: usize,

    /// Solve the whole cube, or only its corners. Defaults to cube, except for `random`.
    #[arg(long, value_enum)]
    target: Option<CliTarget>,

    /// Repeat for more logging (info, debug, trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum CliTarget {
    Cube,
    Corners,
}

impl From<CliTarget> for Target {
    fn from(t: CliTarget) -> Target {
        match t {
            CliTarget::Cube => Target::Cube,
            CliTarget::Corners => Target::Corners,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the state reached by applying a scramble to the solved cube, e.g. "R U R' U'".
    Solve {
        /// Space separated moves.
        scramble: String,
    },
    /// Solve a uniformly random state. Only the corners by default: the corner table alone is
    /// far too weak to solve a random whole cube optimally in reasonable time.
    Random {
        /// Seed for a reproducible state.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate the pattern database and write it, replacing any existing file.
    BuildTable,
    /// Print how many corner states lie at each distance from solved.
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    fn config(&self) -> SearchConfig {
        let target = self.target.unwrap_or(match self.command {
            Commands::Random { .. } => CliTarget::Corners,
            _ => CliTarget::Cube,
        });
        SearchConfig {
            max_depth: self.max_depth,
            target: target.into(),
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.config();

    match &cli.command {
        Commands::Solve { scramble } => {
            let cube = CubieCube::SOLVED.apply_alg(scramble)?;
            let solver = Solver::with_corner_table(&cli.table, config)?;
            let sol = solver.solve(&cube)?;
            println!("{sol} ({} moves)", sol.len());
        }
        Commands::Random { seed } => {
            let cube = match seed {
                Some(seed) => CubieCube::random_with(&mut StdRng::seed_from_u64(*seed)),
                None => CubieCube::random(),
            };
            let solver = Solver::with_corner_table(&cli.table, config)?;
            let sol = solver.solve(&cube)?;
            println!("scramble: {}", sol.clone().inverse());
            println!("solution: {sol} ({} moves)", sol.len());
        }
        Commands::BuildTable => {
            let table = CornerPruningTable::generate(&CornerMoveTable::generate());
            table.save(&cli.table)?;
            info!("wrote {}", cli.table.display());
        }
        Commands::Stats => {
            let table = CornerPruningTable::load_or_generate(&cli.table, CornerMoveTable::generate)?;
            for (depth, count) in table.depth_counts().iter().enumerate() {
                println!("{depth:>2}: {count:>9}");
            }
            println!("average: {:.4}", table.average_depth());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn config(args: &[&str]) -> SearchConfig {
        Cli::try_parse_from(args).unwrap().config()
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_targets() {
        assert_eq!(config(&["cube-ida", "random"]).target, Target::Corners);
        assert_eq!(config(&["cube-ida", "solve", "R U"]).target, Target::Cube);
        assert_eq!(
            config(&["cube-ida", "--target", "cube", "random", "--seed", "3"]).target,
            Target::Cube
        );
        assert_eq!(
            config(&["cube-ida", "--max-depth", "11", "--target", "corners", "solve", "R"]),
            SearchConfig {
                max_depth: 11,
                target: Target::Corners
            }
        );
    }
}
