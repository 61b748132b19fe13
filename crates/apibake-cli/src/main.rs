mod inputs;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use apibake_core::config::{self, BakeConfig, CONFIG_FILE_NAME};
use apibake_core::parse;
use apibake_core::{OpenApiRenderer, RenderOptions};
use apibake_pdf::{PdfCanvas, PdfWriter};

#[derive(Parser)]
#[command(name = "apibake", about = "Convert OpenAPI 3.x specs into PDF documentation", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render OpenAPI specs into a single PDF
    Build(BuildArgs),

    /// Check that OpenAPI specs can be rendered
    Validate {
        /// Spec files (YAML or JSON) or directories containing them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Write the default configuration, for editing
    ExportConfig {
        /// Destination file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        out: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Spec files (YAML or JSON) or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long)]
    out: Option<String>,

    /// Title page heading
    #[arg(long)]
    title: Option<String>,

    /// Title page subheading
    #[arg(long)]
    subtitle: Option<String>,

    /// Give every spec its own schemas section instead of one merged section
    #[arg(long)]
    separate_schemas: bool,

    /// Footer content: "page-number", or "" for none
    #[arg(long)]
    footer: Option<String>,

    /// Print "Empty body." for bodies without content
    #[arg(long)]
    empty_body: bool,

    /// Config file (JSON or YAML); defaults to ./apibake-config.json when present
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => cmd_build(args),

        Commands::Validate { inputs } => cmd_validate(&inputs),

        Commands::ExportConfig { out, force } => cmd_export_config(&out, force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apibake", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the given config file, or the default one from the current directory if it exists.
fn load_config(path: Option<&Path>) -> Result<BakeConfig> {
    match path {
        Some(path) => config::load_config(path)
            .map_err(|e| anyhow::anyhow!(e))?
            .with_context(|| format!("config file {} not found", path.display())),
        None => Ok(config::load_config(Path::new(CONFIG_FILE_NAME))
            .map_err(|e| anyhow::anyhow!(e))?
            .unwrap_or_default()),
    }
}

/// Command line flags take precedence over the config file.
fn apply_overrides(cfg: &mut BakeConfig, args: &BuildArgs) {
    if let Some(out) = &args.out {
        cfg.output.clone_from(out);
    }
    if let Some(title) = &args.title {
        cfg.title.clone_from(title);
    }
    if let Some(subtitle) = &args.subtitle {
        cfg.subtitle.clone_from(subtitle);
    }
    if let Some(footer) = &args.footer {
        cfg.footer.clone_from(footer);
    }
    cfg.separate_schemas |= args.separate_schemas;
    cfg.empty_body |= args.empty_body;
}

fn report_ignored(ignored: &[PathBuf]) {
    for path in ignored {
        eprintln!("  ignored {} (not .json, .yaml or .yml)", path.display());
    }
}

/// One `(source, message)` error per command line path that does not exist.
fn missing_errors(missing: &[PathBuf]) -> Vec<(String, String)> {
    missing
        .iter()
        .map(|path| (path.display().to_string(), "file or folder doesn't exist".to_string()))
        .collect()
}

fn report_errors(errors: &[(String, String)]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("\nErrors:");
    for (source, message) in errors {
        eprintln!("  {source}: {message}");
    }
}

fn cmd_build(args: BuildArgs) -> Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    apply_overrides(&mut cfg, &args);

    let inputs = inputs::collect(&args.inputs)?;
    report_ignored(&inputs.ignored);
    let mut errors = missing_errors(&inputs.missing);
    let total = inputs.files.len() + inputs.missing.len();
    if inputs.files.is_empty() {
        report_errors(&errors);
        anyhow::bail!("no .json, .yaml or .yml input files");
    }

    // The PDF is assembled in memory and only written once every input was handled.
    let mut canvas = PdfCanvas::new(Vec::new());
    canvas.set_title(cfg.title.as_str());
    let mut writer = PdfWriter::new(canvas, &cfg.style, cfg.footer_options())?;

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    writer.title_page(&cfg.title, Some(&cfg.subtitle), Some(&date));

    let options = RenderOptions {
        merge_schemas: !cfg.separate_schemas,
        empty_body_marker: cfg.empty_body,
    };
    log::info!(
        "rendering {} files into {} ({options:?})",
        inputs.files.len(),
        cfg.output
    );
    let mut renderer = OpenApiRenderer::new(&mut writer, options);

    for path in &inputs.files {
        eprintln!("Parsing {}", path.display());
        let tree = match inputs::read_tree(path) {
            Ok(tree) => tree,
            Err(e) => {
                errors.push((path.display().to_string(), format!("{e:#}")));
                continue;
            }
        };
        if let Err(e) = renderer.parse(&tree, &inputs::section_name(path)) {
            if e.is_fatal() {
                return Err(e).with_context(|| format!("failed to render {}", path.display()));
            }
            errors.push((path.display().to_string(), e.to_string()));
        }
    }

    let warnings = match renderer.done() {
        Ok(warnings) => {
            fs::write(&cfg.output, writer.into_canvas().into_inner())
                .with_context(|| format!("failed to write {}", cfg.output))?;
            warnings
        }
        Err(e) => {
            errors.push((cfg.output.clone(), e.to_string()));
            Vec::new()
        }
    };

    if !warnings.is_empty() {
        eprintln!("\nWarnings:");
        for warning in &warnings {
            eprintln!("  {warning}");
        }
    }
    if !errors.is_empty() {
        report_errors(&errors);
        anyhow::bail!("{} of {total} inputs could not be rendered", errors.len());
    }

    eprintln!("Created {}", cfg.output);
    Ok(())
}

fn cmd_validate(paths: &[PathBuf]) -> Result<()> {
    let inputs = inputs::collect(paths)?;
    report_ignored(&inputs.ignored);
    let errors = missing_errors(&inputs.missing);
    report_errors(&errors);

    let mut failed = errors.len();
    for path in &inputs.files {
        let spec = inputs::read_tree(path).and_then(|tree| Ok(parse::load(&tree)?));
        match spec {
            Ok(spec) => {
                let operations: usize = spec.paths.values().map(|p| p.operations.len()).sum();
                let schemas = spec.components.as_ref().map_or(0, |c| c.schemas.len());
                eprintln!(
                    "{}: valid OpenAPI {} spec: {}",
                    path.display(),
                    spec.version,
                    spec.title().unwrap_or("(untitled)")
                );
                eprintln!("  Paths: {}", spec.paths.len());
                eprintln!("  Operations: {operations}");
                eprintln!("  Schemas: {schemas}");
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e:#}", path.display());
            }
        }
    }

    if failed > 0 {
        let total = inputs.files.len() + inputs.missing.len();
        anyhow::bail!("{failed} of {total} inputs are invalid");
    }
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_export_config(out: &Path, force: bool) -> Result<()> {
    if out.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite.", out.display());
    }
    fs::write(out, config::default_config_content())
        .with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("Created {}", out.display());
    Ok(())
}
