mod render;
mod replay;
mod simulate;
mod theme;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use theme::Theme;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use yewnock_core::{
    EngineConfig, FillSlot, GeneratorConfig, Inventory, PuzzleGenerator, PuzzleSession, SeedSlot,
    VarpHost,
};

#[derive(Debug, Parser)]
#[command(name = "yewnock", version, about = "Solve and replay Yewnock's disc machine")]
struct Cli {
    /// Config file [default: <config dir>/yewnock/config.json]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print without colours
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every weight class and the discs in it
    Table,
    /// List the disc pairs that sum to a target, in search order
    Pairs { sum: u8 },
    /// Work out the next action for one machine state
    Solve {
        /// Puzzle 1 left seed disc id
        #[arg(long)]
        left: u32,
        /// Puzzle 1 right seed disc id
        #[arg(long)]
        right: u32,
        /// Puzzle 2 seed disc id
        #[arg(long)]
        puzzle2: u32,
        /// Held discs as id:quantity pairs, e.g. 13:1,2:2
        #[arg(long, value_parser = parse_inventory)]
        inventory: Option<Inventory>,
        /// Already filled receptacle, e.g. p1=13 (repeatable)
        #[arg(long = "filled", value_parser = parse_filled)]
        filled: Vec<(FillSlot, u32)>,
    },
    /// Replay a recorded JSON script of host frames
    Replay { file: PathBuf },
    /// Generate a machine and play it by following the engine
    Simulate {
        /// RNG seed for a reproducible machine
        #[arg(long)]
        seed: Option<u64>,
        /// Most random extra discs to add to the inventory
        #[arg(long, default_value_t = 6)]
        extra: usize,
    },
}

fn parse_inventory(s: &str) -> Result<Inventory, String> {
    let mut pairs = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (id, quantity) = part
            .split_once(':')
            .ok_or_else(|| format!("expected id:quantity, got '{}'", part))?;
        let id = id.trim().parse().map_err(|_| format!("bad disc id '{}'", id))?;
        let quantity = quantity
            .trim()
            .parse()
            .map_err(|_| format!("bad quantity '{}'", quantity))?;
        pairs.push((id, quantity));
    }
    Ok(Inventory::from_pairs(pairs))
}

fn parse_filled(s: &str) -> Result<(FillSlot, u32), String> {
    let (slot, id) = s
        .split_once('=')
        .ok_or_else(|| format!("expected slot=id, got '{}'", s))?;
    let slot = match slot.trim() {
        "p1" | "puzzle1" => FillSlot::Puzzle1,
        "upper" => FillSlot::Puzzle2Upper,
        "lower" => FillSlot::Puzzle2Lower,
        other => return Err(format!("unknown slot '{}' (p1, upper, lower)", other)),
    };
    let id = id.trim().parse().map_err(|_| format!("bad disc id '{}'", id))?;
    Ok((slot, id))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => match dirs::config_dir() {
            Some(dir) => {
                let path = dir.join("yewnock").join("config.json");
                EngineConfig::load_or_default(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))
            }
            None => Ok(EngineConfig::default()),
        },
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let mut session = PuzzleSession::from_config(&config)?;
    let theme = if cli.no_color {
        Theme::plain()
    } else {
        Theme::default()
    };
    let mut stdout = io::stdout();

    run(cli.command, &config, &mut session, &theme, &mut stdout)
}

fn run(
    command: Command,
    config: &EngineConfig,
    session: &mut PuzzleSession,
    theme: &Theme,
    out: &mut impl Write,
) -> Result<()> {
    let table = session.solver().table().clone();
    let layout = config.layout.clone();

    match command {
        Command::Table => render::render_table(out, theme, &table)?,
        Command::Pairs { sum } => {
            render::render_pairs(out, theme, &table, session.solver().pairs(), sum)?
        }
        Command::Solve {
            left,
            right,
            puzzle2,
            inventory,
            filled,
        } => {
            let mut host = VarpHost::new(layout.clone());
            host.visible = true;
            host.set_seed(SeedSlot::Puzzle1Left, left as i32);
            host.set_seed(SeedSlot::Puzzle1Right, right as i32);
            host.set_seed(SeedSlot::Puzzle2, puzzle2 as i32);
            for (slot, id) in filled {
                host.set_slot(slot, id as i32);
            }
            let inventory = inventory.unwrap_or_default();
            render::render_inventory(out, theme, &table, &inventory)?;
            host.container = Some(inventory);

            let action = session.on_tick(&host);
            render::render_action(out, theme, &table, &layout, &action)?;
        }
        Command::Replay { file } => {
            let script = replay::ReplayScript::load(&file)?;
            let actions = replay::run(&script, session, &layout);
            for (i, action) in actions.iter().enumerate() {
                write!(out, "{:>4}  ", i)?;
                render::render_action(out, theme, &table, &layout, action)?;
            }
        }
        Command::Simulate { seed, extra } => {
            let generator = match seed {
                Some(seed) => PuzzleGenerator::with_seed(seed),
                None => PuzzleGenerator::new(),
            };
            let mut generator = generator
                .with_solver(session.solver().clone())
                .with_config(GeneratorConfig {
                    max_extra_discs: extra,
                    ..GeneratorConfig::default()
                });
            let Some(puzzle) = generator.generate() else {
                bail!("the disc catalogue cannot form a solvable machine");
            };

            let name = |id| {
                table
                    .disc(id)
                    .map(|d| format!("{} ({})", d, d.weight()))
                    .unwrap_or_else(|| format!("{}", id))
            };
            writeln!(
                out,
                "Puzzle 1: {} + {}",
                name(puzzle.puzzle1_left),
                name(puzzle.puzzle1_right)
            )?;
            writeln!(out, "Puzzle 2: {}", name(puzzle.puzzle2))?;
            render::render_inventory(out, theme, &table, &puzzle.inventory)?;

            for action in simulate::play(&puzzle, session, &layout) {
                render::render_action(out, theme, &table, &layout, &action)?;
            }
        }
    }

    Ok(())
}
