//! Sprig command-line converter.
//!
//! Reads a selection exported from the design tool as JSON (one node or an
//! array of nodes) and prints the generated code.
//!
//! ```bash
//! sprig convert card.json --framework tailwind --round-values
//! sprig convert card.json --settings stored.json --json
//! sprig palette material
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sprig_codegen::{build_ir, run, HostMessage};
use sprig_core::{Diagnostics, Framework, GenerationMode, SceneNode, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sprig", version, about = "Convert design selections to UI code")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a selection to code.
    Convert(ConvertArgs),
    /// List the entries of a named color palette.
    Palette {
        /// Tailwind, Material, or SwiftUI
        name: String,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Selection JSON: one node or an array of nodes.
    scene: PathBuf,

    /// Stored settings JSON; unknown or mistyped keys are ignored.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Target framework (html, tailwind, flutter, swiftui).
    #[arg(long, short)]
    framework: Option<String>,

    /// JSX attribute syntax for HTML and Tailwind.
    #[arg(long)]
    jsx: bool,

    /// Emit a class stylesheet instead of inline styles.
    #[arg(long)]
    classes: bool,

    /// Snap sizes and spacing to the Tailwind scale.
    #[arg(long)]
    round_values: bool,

    /// Snap colors to the nearest Tailwind color.
    #[arg(long)]
    round_colors: bool,

    /// Write layer names into the generated code.
    #[arg(long)]
    layer_names: bool,

    /// Wrap Flutter and SwiftUI output in a runnable app.
    #[arg(long)]
    full: bool,

    /// Print the IR forest instead of code.
    #[arg(long)]
    emit_ir: bool,

    /// Print the host message as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Palette { name } => cmd_palette(&name),
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let roots = read_scene(&args.scene)?;
    let settings = settings_for(&args)?;
    tracing::debug!(roots = roots.len(), framework = %settings.framework, "converting");

    if args.emit_ir {
        let mut diag = Diagnostics::new();
        let forest = build_ir(&roots, None, &settings, &mut diag)?;
        println!("{}", serde_json::to_string_pretty(&forest)?);
        return Ok(());
    }

    if args.json {
        let message = sprig_codegen::safe_run(&roots, None, &settings);
        println!("{}", serde_json::to_string_pretty(&message)?);
        if let HostMessage::Error { error } = message {
            anyhow::bail!(error);
        }
        return Ok(());
    }

    let output = run(&roots, None, &settings)?;
    for artifact in &output.artifacts {
        println!("// ---- {} ({}) ----", artifact.title, artifact.language);
        println!("{}", artifact.body);
        println!();
    }
    for warning in &output.warnings {
        eprintln!("warning: {}: {}", warning.node_id, warning.reason);
    }
    Ok(())
}

fn cmd_palette(name: &str) -> anyhow::Result<()> {
    for entry in sprig_resolver::retrieve_palette(name)? {
        match &entry.meta {
            Some(meta) => println!("{}  {}  ({})", entry.hex, entry.name, meta),
            None => println!("{}  {}", entry.hex, entry.name),
        }
    }
    Ok(())
}

fn read_scene(path: &Path) -> anyhow::Result<Vec<SceneNode>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read scene '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse scene '{}'", path.display()))?;
    let roots = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(roots)
}

fn settings_for(args: &ConvertArgs) -> anyhow::Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read settings '{}'", path.display()))?;
            let stored: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parse settings '{}'", path.display()))?;
            Settings::from_json_lenient(&stored)
        }
        None => Settings::default(),
    };

    if let Some(name) = &args.framework {
        settings.framework = Framework::from_name(name)
            .with_context(|| format!("unknown framework '{}'", name))?;
    }
    settings.jsx |= args.jsx;
    settings.round_tailwind_values |= args.round_values;
    settings.round_tailwind_colors |= args.round_colors;
    settings.show_layer_names |= args.layer_names;
    if args.classes {
        settings.inline_style = false;
    }
    if args.full {
        settings.flutter_generation_mode = GenerationMode::Full;
        settings.swiftui_generation_mode = GenerationMode::Full;
    }
    Ok(settings)
}
