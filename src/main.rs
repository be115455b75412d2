//! Replays a recorded pointer session against a diagram and prints every
//! semantic event it produces as a JSON line.
//!
//! Input is one JSON object per line, e.g.
//!
//! ```text
//! {"op":"down","x":10,"y":10}
//! {"op":"move","x":15,"y":10}
//! {"op":"up","x":15,"y":10}
//! {"op":"wheel","x":100,"y":50,"dy":800}
//! ```

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use serde::Deserialize;
use tracing::{debug, info};

use diagram::input::{Button, Modifiers, WheelDelta};
use diagram::model::{Category, Link, Node, NodeDefinition};
use diagram::{AreaSize, Diagram, DiagramError, DiagramEvent, EventKind, Frame, Point, Renderer, Theme, ThemeError};

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error(transparent)]
    Diagram(#[from] DiagramError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid diagram file: {0}")]
    DiagramFile(serde_json::Error),
    #[error("line {line}: invalid step: {source}")]
    Step { line: usize, source: serde_json::Error },
    #[error("failed to encode event: {0}")]
    Encode(serde_json::Error),
    #[error("i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "diagram-replay", about = "Replay pointer input against a diagram and print semantic events")]
struct Cli {
    /// JSON-lines file of pointer steps. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Theme JSON file. The built-in theme is used when omitted.
    #[arg(long, env = "DIAGRAM_THEME")]
    theme: Option<PathBuf>,

    /// Diagram JSON file with `nodes`, `links`, `categories` and `definitions`.
    #[arg(long, env = "DIAGRAM_FILE")]
    diagram: Option<PathBuf>,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,
}

fn primary() -> Button {
    Button::Primary
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        #[serde(default = "primary")]
        button: Button,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        #[serde(default = "primary")]
        button: Button,
    },
    Wheel {
        x: f64,
        y: f64,
        dy: f64,
        #[serde(default)]
        dx: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Tick,
}

#[derive(Debug, Default, Deserialize)]
struct DiagramFile {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    links: Vec<Link>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    definitions: Vec<NodeDefinition>,
}

/// Logs a one-line summary per frame instead of drawing.
struct TraceRenderer;

impl Renderer for TraceRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        debug!(
            scale = frame.view.scale,
            pan_x = frame.view.pan_x,
            pan_y = frame.view.pan_y,
            nodes = frame.state.nodes.len(),
            selected = frame.state.selected_nodes.len(),
            "frame"
        );
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let theme = match &cli.theme {
        Some(path) => Theme::from_json_str(&read_to_string(path)?)?,
        None => Theme::default(),
    };
    let diagram = Diagram::new(theme, AreaSize::new(cli.width, cli.height), TraceRenderer)?;

    if let Some(path) = &cli.diagram {
        let file: DiagramFile = serde_json::from_str(&read_to_string(path)?).map_err(ReplayError::DiagramFile)?;
        diagram.set_categories(file.categories);
        diagram.set_definitions(file.definitions);
        diagram.load(file.nodes, file.links);
    }

    let published = Rc::new(RefCell::new(Vec::new()));
    let semantic = EventKind::ALL.into_iter().filter(|k| !k.is_raw_input() && *k != EventKind::RenderRequested);
    for kind in semantic {
        let sink = Rc::clone(&published);
        diagram.bus().subscribe(kind, move |event: &DiagramEvent| sink.borrow_mut().push(event.clone()));
    }

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).map_err(|source| ReplayError::Read { path: path.display().to_string(), source })?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let step: Step = serde_json::from_str(&line).map_err(|source| ReplayError::Step { line: index + 1, source })?;
        apply(&diagram, step)?;
        for event in published.borrow_mut().drain(..) {
            writeln!(out, "{}", serde_json::to_string(&event).map_err(ReplayError::Encode)?)?;
        }
    }

    let view = diagram.view();
    info!(scale = view.scale, pan_x = view.pan_x, pan_y = view.pan_y, frames = diagram.frames(), "replay finished");
    Ok(())
}

fn apply(diagram: &Diagram, step: Step) -> Result<(), ReplayError> {
    let modifiers = |shift: bool| Modifiers { shift, ..Modifiers::default() };
    match step {
        Step::Down { x, y, shift, button } => diagram.on_pointer_down(Point::new(x, y), button, modifiers(shift)),
        Step::Move { x, y, shift } => diagram.on_pointer_move(Point::new(x, y), modifiers(shift)),
        Step::Up { x, y, shift, button } => diagram.on_pointer_up(Point::new(x, y), button, modifiers(shift)),
        Step::Wheel { x, y, dy, dx } => diagram.on_wheel(Point::new(x, y), WheelDelta { dx, dy }),
        Step::Resize { width, height } => diagram.resize(AreaSize::new(width, height))?,
        Step::Tick => diagram.tick(),
    }
    Ok(())
}

fn read_to_string(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.display().to_string(), source })
}
