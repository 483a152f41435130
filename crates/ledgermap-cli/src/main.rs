use ledgermap_core::gridpack::XorShift64Star;
use ledgermap_core::{DiagramDocument, LayoutReport, Placement, Transition, Viewport};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Diagram(ledgermap_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Diagram(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ledgermap_core::Error> for CliError {
    fn from(value: ledgermap_core::Error) -> Self {
        Self::Diagram(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Pack,
    Arrange,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    animated: bool,
    seed: Option<u64>,
    viewport_width: Option<f64>,
    viewport_height: Option<f64>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    positions: Vec<Placement>,
    report: &'a LayoutReport,
    transitions: Vec<Transition>,
}

fn usage() -> &'static str {
    "ledgermap-cli\n\
\n\
USAGE:\n\
  ledgermap-cli [pack] [--pretty] [--seed <n>] [--animated] [--viewport-width <w>] [--viewport-height <h>] [<path>|-]\n\
  ledgermap-cli arrange [--pretty] [--seed <n>] [--animated] [--viewport-width <w>] [--viewport-height <h>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the diagram JSON is read from stdin.\n\
  - pack places the document's targets into free cells; arrange lays out every account in order.\n\
  - Flags override the document's viewport and layout settings.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "pack" => args.command = Command::Pack,
            "arrange" => args.command = Command::Arrange,
            "--pretty" => args.pretty = true,
            "--animated" => args.animated = true,
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--viewport-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_width =
                    Some(w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--viewport-height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_height =
                    Some(h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut doc = DiagramDocument::from_json_str(&text)?;

    if args.animated {
        doc.layout.animated = true;
    }
    if let Some(seed) = args.seed {
        doc.layout.seed = seed;
    }
    let viewport = Viewport {
        width: args.viewport_width.unwrap_or(doc.viewport.width),
        height: args.viewport_height.unwrap_or(doc.viewport.height),
    };

    let mut graph = doc.build_graph()?;
    let mut rng = XorShift64Star::new(doc.layout.seed);
    let report = match args.command {
        Command::Pack => {
            let targets = doc.resolved_targets();
            ledgermap_core::pack(&mut graph, &doc.layout, viewport, &targets[..], &mut rng)?
        }
        Command::Arrange => ledgermap_core::arrange(&mut graph, &doc.layout, viewport, &mut rng)?,
    };

    let transitions = graph.drain_transitions();
    let positions = graph
        .accounts()
        .map(|n| Placement {
            id: n.id.clone(),
            x: n.geometry.x,
            y: n.geometry.y,
        })
        .collect();
    write_json(
        &LayoutOut {
            positions,
            report: &report,
            transitions,
        },
        args.pretty,
    )
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();
    tracing::debug!(version = ledgermap_core::VERSION, command = ?args.command, "starting");

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
