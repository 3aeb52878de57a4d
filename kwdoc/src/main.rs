//! kwdoc: generate Robot Framework keyword documentation from Python
//! library sources.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `kwdoc < MyLibrary.py` prints markdown to stdout
//! - **file mode**: `kwdoc -f html -o docs libraries/*.py`

mod config;
mod logging;
mod render;
mod scanner;
mod toc;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use kwdoc_core::DocRenderer;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "kwdoc",
    about = "Generate Robot Framework keyword documentation from Python library sources"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output file for a single input, otherwise an output directory.
    /// Defaults to the current directory.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), html, json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// JSON configuration file with custom keywords and standard libraries
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    let renderer = render::create_renderer(&cli.format)?;
    let mut docs = DocRenderer::new(config::load_or_default(cli.config.as_deref()));

    if cli.files.is_empty() {
        return stdin_mode(renderer.as_ref(), &mut docs);
    }

    file_mode(&cli, renderer.as_ref(), &mut docs)
}

/// stdin mode: read one Python library from stdin, write to stdout.
fn stdin_mode(renderer: &dyn render::Renderer, docs: &mut DocRenderer) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let source = scanner::python::scan(&input, "Library");
    let doc = docs.build_library(&source);
    print!("{}", renderer.render(&doc)?);
    Ok(())
}

/// file mode: document each input file into its own output file.
fn file_mode(cli: &Cli, renderer: &dyn render::Renderer, docs: &mut DocRenderer) -> Result<()> {
    let input_files = collect_inputs(&cli.files)?;
    if input_files.is_empty() {
        bail!("no input files matched");
    }

    let ext = renderer.file_extension();
    let single = input_files.len() == 1;

    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let source = match scanner::scan_file(path, &content) {
            Ok(source) => source,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        if source.functions.is_empty() {
            warn!("no keywords found in {}", path.display());
        }

        let doc = docs.build_library(&source);
        let name = derive_output_name(&path.to_string_lossy());
        let out_path = output_path(cli.output.as_deref(), single, &name, ext)?;

        fs::write(&out_path, renderer.render(&doc)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!(
            "documented {} keywords of {} into {}",
            doc.keywords.len(),
            doc.name,
            out_path.display()
        );
    }

    Ok(())
}

/// Resolve where one rendered document goes. A single input may name its
/// output file directly; several inputs always go into a directory.
fn output_path(output: Option<&Path>, single: bool, name: &str, ext: &str) -> Result<PathBuf> {
    let file_name = format!("{}.{}", name, ext);
    let Some(output) = output else {
        return Ok(PathBuf::from(file_name));
    };

    if single && !output.is_dir() {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        return Ok(output.to_path_buf());
    }

    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;
    Ok(output.join(file_name))
}

/// Resolve the positional inputs to library files, sorted and deduplicated.
///
/// Each input is tried as a file, then as a directory (its `.py` files, not
/// recursive), then as a glob pattern. Inputs that match nothing only warn;
/// the caller decides whether an empty result is fatal.
fn collect_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        let found = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            library_files_in(path)?
        } else {
            glob::glob(input)
                .with_context(|| format!("invalid glob pattern: {}", input))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect()
        };
        if found.is_empty() {
            warn!("no library files matched: {}", input);
        }
        files.extend(found);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn library_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_library_file(p))
        .collect())
}

fn is_library_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| scanner::SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Derive the output file name (without extension) from a source path.
/// "libraries/SampleLibrary.py" → "SampleLibrary"
fn derive_output_name(source: &str) -> String {
    let filename = source.rsplit(['/', '\\']).next().unwrap_or(source);
    filename
        .strip_suffix(".py")
        .unwrap_or(filename)
        .to_string()
}
