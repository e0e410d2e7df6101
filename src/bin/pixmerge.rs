use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use pixmerge::{Command, FsLoader, Job, OutputTarget, SweepThreading};

#[derive(Parser, Debug)]
#[command(
    name = "pixmerge",
    version,
    about = "Downscale an image or merge a second image onto it"
)]
struct Cli {
    /// Input image (bmp, gif, jpeg/jpg, png). `~` expands to the home directory.
    input: PathBuf,

    /// `scale:<factor>` or `merge:<overlay>[:<x>][:<y>]`. The two-token forms
    /// `scale <factor>` and `merge[:<x>:<y>] <overlay>` are also accepted.
    command: String,

    /// `[ARG] [OUTPUT]`: ARG only for the two-token forms. Without OUTPUT the result is
    /// written to stdout as BMP.
    #[arg(num_args = 0..=2)]
    rest: Vec<String>,

    /// Evaluate output rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Disable logging.
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Log details, even when writing to stdout.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let job = build_job(&cli)?;

    let log_enabled = !cli.quiet && (cli.verbose || job.output != OutputTarget::Stdout);
    init_logging(log_enabled, cli.verbose);

    let rendered = pixmerge::run_job(&job, &FsLoader)
        .with_context(|| format!("{} '{}'", job.command.name(), job.input.display()))?;
    tracing::debug!(
        width = rendered.width,
        height = rendered.height,
        bytes = rendered.bytes.len(),
        format = %rendered.format,
        "done"
    );
    Ok(())
}

fn build_job(cli: &Cli) -> anyhow::Result<Job> {
    let (command, output) = if Command::is_legacy_mode(&cli.command) {
        let arg = cli
            .rest
            .first()
            .with_context(|| format!("'{}' needs an argument", cli.command))?;
        (Command::parse_legacy(&cli.command, arg)?, cli.rest.get(1))
    } else {
        if cli.rest.len() > 1 {
            anyhow::bail!("unexpected argument '{}'", cli.rest[1]);
        }
        (Command::parse(&cli.command)?, cli.rest.first())
    };

    Ok(Job {
        input: cli.input.clone(),
        command,
        output: output.map_or(OutputTarget::Stdout, |p| OutputTarget::File(PathBuf::from(p))),
        threading: SweepThreading {
            parallel: cli.parallel,
            threads: cli.threads,
        },
    })
}

// Logs go to stderr so they never mix with image bytes on stdout.
fn init_logging(enabled: bool, verbose: bool) {
    if !enabled {
        return;
    }
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
