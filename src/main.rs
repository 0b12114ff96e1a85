use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sphere_web::{ConnectionMode, GenerationConfig, Point, SegmentLayer, Session};

/// Spherical grid points connected by proximity heuristics
#[derive(Parser)]
#[command(name = "sphere-web", version, long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid step in degrees
    #[arg(long)]
    angle_step: Option<f64>,

    /// Angular jitter in degrees
    #[arg(long)]
    randomize_angle: Option<f64>,

    /// Radius jitter as a fraction of the radius
    #[arg(long)]
    randomize_radius: Option<f64>,

    /// Connection distance threshold
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Connection mode: dist, closest or nearest
    #[arg(short, long)]
    mode: Option<ConnectionMode>,

    /// Cap on flattened edge entries
    #[arg(long)]
    geom_limit: Option<usize>,

    /// Seed for the jitter source
    #[arg(long)]
    seed: Option<u64>,

    /// Reuse the point field across changes instead of regenerating it
    #[arg(long)]
    keep_points: bool,

    /// What to print after each rebuild
    #[arg(short, long, value_enum, default_value_t = Output::Summary)]
    output: Output,

    /// Read commands from stdin (regen, generate, set <field> <value>, show, quit)
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    Summary,
    Points,
    Edges,
    Config,
}

impl Cli {
    fn load_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GenerationConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GenerationConfig::default(),
        };
        if let Some(v) = self.angle_step {
            config.angle_step = v;
        }
        if let Some(v) = self.randomize_angle {
            config.randomize_angle = v;
        }
        if let Some(v) = self.randomize_radius {
            config.randomize_radius = v;
        }
        if let Some(v) = self.threshold {
            config.connection_threshold = v;
        }
        if let Some(v) = self.mode {
            config.mode = v;
        }
        if let Some(v) = self.geom_limit {
            config.geom_limit = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.keep_points {
            config.regenerate_on_change = false;
        }
        Ok(config)
    }
}

fn write_point(out: &mut impl Write, p: &Point) -> io::Result<()> {
    write!(out, "{{{},{},{}}}", p.x, p.y, p.z)
}

fn report(out: &mut impl Write, session: &Session, layer: &SegmentLayer, output: Output) -> Result<()> {
    match output {
        Output::Summary => {
            let edges = session.current_edge_list();
            writeln!(
                out,
                "#{} points={} edges={} flattened={} limit_reached={} mode={}",
                layer.generation(),
                session.points().len(),
                edges.len(),
                edges.flattened_len(),
                edges.limit_reached(),
                session.config().mode
            )?;
        }
        Output::Points => {
            for point in session.points() {
                write_point(out, point)?;
                writeln!(out, ",")?;
            }
        }
        Output::Edges => {
            for (a, b) in session.current_edge_list().edges() {
                write!(out, "{{")?;
                write_point(out, a)?;
                write!(out, ",")?;
                write_point(out, b)?;
                writeln!(out, "}},")?;
            }
        }
        Output::Config => writeln!(out, "{}", session.config().to_json()?)?,
    }
    Ok(())
}

fn interactive(session: &mut Session, layer: &mut SegmentLayer, output: Output) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (None | Some("regen"), ..) => session.request_regenerate(false),
            (Some("generate"), ..) => session.request_regenerate(true),
            (Some("set"), Some(field), Some(value)) => {
                if let Err(err) = session.set_field(field, value) {
                    writeln!(out, "error: {err}")?;
                }
            }
            (Some("auto"), Some(value), None) => match value {
                "on" => session.set_regenerate_on_change(true),
                "off" => session.set_regenerate_on_change(false),
                _ => writeln!(out, "usage: auto on|off")?,
            },
            (Some("show"), ..) => writeln!(out, "{}", session.config().to_json()?)?,
            (Some("quit" | "exit"), ..) => break,
            _ => writeln!(
                out,
                "commands: regen | generate | set <field> <value> | auto on|off | show | quit"
            )?,
        }
        if session.process(layer) {
            report(&mut out, session, layer, output)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let mut session = Session::new(config).context("invalid configuration")?;
    let mut layer = SegmentLayer::new();

    session.regenerate(true, &mut layer);
    report(&mut io::stdout().lock(), &session, &layer, cli.output)?;

    if cli.interactive {
        interactive(&mut session, &mut layer, cli.output)?;
    }
    Ok(())
}
