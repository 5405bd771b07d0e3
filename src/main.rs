use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use attestation_print::config::{load_request, template_source};
use attestation_print::AttestationRenderer;

/// Fill the travel attestation template from request files.
#[derive(Parser, Debug)]
#[command(name = "attestation_print")]
#[command(about = "Fill the travel attestation template from request files.", long_about = None)]
struct Args {
    /// Request file(s) in JSON; each one produces its own PDF
    #[arg(short, long = "request", required = true, num_args = 1..)]
    requests: Vec<PathBuf>,

    /// Directory the PDFs are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Template to fill instead of the bundled one
    #[arg(short, long, env = "ATTESTATION_TEMPLATE")]
    template: Option<PathBuf>,
}

/// Output file name for one request.
///
/// In a batch the position of the request on the command line is part of
/// the name, so files with the same stem in different directories never
/// collide.
fn output_name(index: usize, request_path: &Path, file_name: &str, batch: bool) -> String {
    if !batch {
        return file_name.to_string();
    }
    let stem = request_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "request".to_string());
    format!("{:03}-{}-{}", index + 1, stem, file_name)
}

async fn run(args: Args) -> Result<()> {
    if !args.output_dir.is_dir() {
        return Err(anyhow!("Output directory not found: {:?}", args.output_dir));
    }

    let renderer = Arc::new(AttestationRenderer::new(template_source(args.template)));
    // A broken template means no request can be served; fail before reading any.
    renderer
        .template()
        .load()
        .with_context(|| "Template check failed")?;
    info!(template = ?renderer.template(), "template ready");

    let mut tasks = JoinSet::new();
    for (index, path) in args.requests.iter().enumerate() {
        let request = load_request(path)?;
        let renderer = Arc::clone(&renderer);
        let path = path.clone();
        tasks.spawn(async move { (index, path, renderer.render_on_worker(request).await) });
    }

    let batch = args.requests.len() > 1;
    let mut written = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (index, path, rendered) = joined.with_context(|| "Rendering task panicked")?;
        let rendered = rendered.with_context(|| format!("Failed to render {:?}", path))?;

        let file_name = output_name(index, &path, &rendered.file_name(), batch);
        let output_path = args.output_dir.join(file_name);
        if output_path.exists() {
            warn!(path = ?output_path, "overwriting existing file");
        }
        std::fs::write(&output_path, rendered.as_bytes())
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        info!(path = ?output_path, "saved attestation");
        written += 1;
    }

    println!("Successfully saved {} attestation(s) to {:?}", written, args.output_dir);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("attestation_print=info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        for cause in e.chain().skip(1) {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
