use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lightmix", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset of task pairs.
    Generate(GenerateArgs),
    /// Render the initial and final frames for a fixed color pair.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Output root directory.
    #[arg(long)]
    out: PathBuf,

    /// Number of tasks to generate.
    #[arg(long, default_value_t = 10)]
    num_samples: u32,

    /// JSON config file; missing keys use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible colors and prompts.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip MP4 animations even if the config enables them.
    #[arg(long)]
    no_videos: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Output directory for `initial.png` and `final.png`.
    #[arg(long)]
    out: PathBuf,

    /// Left light as `r,g,b`.
    #[arg(long, value_parser = parse_rgb)]
    color1: lightmix::Rgb8,

    /// Right light as `r,g,b`.
    #[arg(long, value_parser = parse_rgb)]
    color2: lightmix::Rgb8,

    /// JSON config file; missing keys use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_rgb(s: &str) -> Result<lightmix::Rgb8, String> {
    lightmix::Rgb8::parse_triplet(s).map_err(|e| e.to_string())
}

fn read_config(path: Option<&Path>) -> anyhow::Result<lightmix::TaskConfig> {
    match path {
        Some(p) => lightmix::TaskConfig::from_json_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(lightmix::TaskConfig::default()),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = read_config(args.config.as_deref())?;
    if args.no_videos {
        config.generate_videos = false;
    }

    let mut generator = match args.seed {
        Some(seed) => lightmix::TaskGenerator::with_seed(config, seed)?,
        None => lightmix::TaskGenerator::from_entropy(config)?,
    };

    let opts = lightmix::DatasetOpts {
        out_dir: args.out.clone(),
        num_samples: args.num_samples,
    };
    let summary = lightmix::generate_dataset(&mut generator, &opts);

    eprintln!(
        "wrote {} task(s) to {} ({} failed)",
        summary.written,
        args.out.display(),
        summary.failed
    );
    if summary.failed > 0 && summary.written == 0 {
        anyhow::bail!("no tasks could be written");
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let task = lightmix::TaskData::new(args.color1, args.color2, "default");

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let initial = lightmix::compose_initial(&task, &config);
    let initial_path = args.out.join("initial.png");
    initial.save_png(&initial_path)?;

    let final_frame = lightmix::compose_final(&task, &config);
    let final_path = args.out.join("final.png");
    final_frame.save_png(&final_path)?;

    eprintln!(
        "mixed {:?} + {:?} = {:?}",
        task.color1, task.color2, task.result
    );
    eprintln!("wrote {}", initial_path.display());
    eprintln!("wrote {}", final_path.display());
    Ok(())
}
