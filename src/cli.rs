use crate::config::load_config;
use crate::ir::{Direction, LayoutMode};
use crate::layout::compute_layout;
use crate::layout_dump::{write_layers, write_position_dump};
use crate::parser::parse_story_graph;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sflow", version, about = "Auto-layout for branching story-flow graphs")]
pub struct Args {
    /// Input graph (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout direction
    #[arg(short = 'd', long = "direction", value_enum)]
    pub direction: Option<DirectionArg>,

    /// Layout mode
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Config JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Node width used by tree mode
    #[arg(long = "nodeWidth")]
    pub node_width: Option<f32>,

    /// Horizontal gap between sibling subtrees
    #[arg(long = "gapX")]
    pub gap_x: Option<f32>,

    /// Vertical gap between tree depths
    #[arg(long = "gapY")]
    pub gap_y: Option<f32>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "layers")]
    pub format: OutputFormat,

    /// Log engine decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DirectionArg {
    Vertical,
    Horizontal,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Vertical => Direction::Vertical,
            DirectionArg::Horizontal => Direction::Horizontal,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Tree,
    Compact,
}

impl From<ModeArg> for LayoutMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Tree => LayoutMode::Tree,
            ModeArg::Compact => LayoutMode::Compact,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    /// The full layer array with positions filled in
    Layers,
    /// A flat id / x / y listing
    Positions,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(direction) = args.direction {
        config.direction = direction.into();
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(value) = args.node_width {
        config.layout.tree.node_width = value;
        config.layout.compact.node_width = value;
    }
    if let Some(value) = args.gap_x {
        config.layout.tree.gap_x = value;
    }
    if let Some(value) = args.gap_y {
        config.layout.tree.gap_y = value;
    }

    let input = read_input(args.input.as_deref())?;
    let layers = parse_story_graph(&input)?;

    let arranged = match compute_layout(&layers, config.direction, config.mode, &config.layout) {
        Ok(arranged) => arranged,
        // Notices leave the graph as it was; the warning is already logged.
        Err(err) if err.is_notice() => layers,
        Err(err) => return Err(err.into()),
    };

    let mut writer = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Layers => write_layers(&mut writer, &arranged)?,
        OutputFormat::Positions => {
            write_position_dump(&mut writer, &arranged, config.direction, config.mode)?
        }
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if path != Path::new("-") => Ok(Box::new(BufWriter::new(File::create(path)?))),
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
