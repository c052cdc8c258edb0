use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use stripline::{
    ConversionParameters, Converter, OutputFormat, StripResult, denoise, edge, mask, pipeline,
};

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an image into SVG, AI and EPS vector documents
    Convert(ConvertCommand),
    /// Export the thresholded edge mask as a PNG
    Mask(MaskCommand),
}

#[derive(Args, Debug)]
struct ConvertCommand {
    /// Input image path
    input: PathBuf,
    /// Directory for the generated files (defaults to the input's directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Formats to generate (defaults to all three)
    #[arg(long = "format", value_enum)]
    formats: Vec<FormatArg>,
    #[command(flatten)]
    params: ParameterArgs,
}

#[derive(Args, Debug)]
struct MaskCommand {
    /// Input image path
    input: PathBuf,
    /// Output PNG path (defaults to `<name>-edges.png`)
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    params: ParameterArgs,
}

#[derive(Args, Debug)]
struct ParameterArgs {
    /// Median filter strength (window radius; 0 disables denoising)
    #[arg(long = "denoise-strength", default_value_t = 1.0)]
    denoise_strength: f32,
    /// Gaussian sigma applied before gradient computation
    #[arg(long = "edge-sigma", default_value_t = 1.0)]
    edge_sigma: f32,
    /// Edge intensity cutoff in [0, 1]
    #[arg(long = "threshold", default_value_t = 0.2)]
    threshold: f32,
}

impl From<&ParameterArgs> for ConversionParameters {
    fn from(args: &ParameterArgs) -> Self {
        Self {
            denoise_strength: args.denoise_strength,
            edge_sigma: args.edge_sigma,
            threshold: args.threshold,
        }
    }
}

/// Output format selection.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Svg,
    Ai,
    Eps,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Ai => OutputFormat::Ai,
            FormatArg::Eps => OutputFormat::Eps,
        }
    }
}

fn main() -> StripResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Convert(cmd) => handle_convert(cmd),
        Commands::Mask(cmd) => handle_mask(cmd),
    }
}

/// Handle the 'convert' command.
fn handle_convert(cmd: &ConvertCommand) -> StripResult<()> {
    let params = ConversionParameters::from(&cmd.params);
    let session = Converter::new()
        .with_denoise_strength(params.denoise_strength)
        .with_edge_sigma(params.edge_sigma)
        .with_threshold(params.threshold)
        .for_image(&cmd.input)?;

    let formats: Vec<OutputFormat> = if cmd.formats.is_empty() {
        vec![OutputFormat::Svg, OutputFormat::Ai, OutputFormat::Eps]
    } else {
        cmd.formats.iter().copied().map(Into::into).collect()
    };

    for format in formats {
        let payload = format.encode(session.document());
        let path = derive_output_path(&cmd.input, cmd.out_dir.as_deref(), format.extension());
        fs::write(&path, payload)?;
        println!(
            "{} saved to {}",
            format.extension().to_uppercase(),
            path.display()
        );
    }

    Ok(())
}

/// Handle the 'mask' command.
fn handle_mask(cmd: &MaskCommand) -> StripResult<()> {
    let params = ConversionParameters::from(&cmd.params);
    params.validate()?;

    let raw = fs::read(&cmd.input)?;
    let buffer = pipeline::decode_raster(&raw)?;
    let denoised = denoise::median_denoise(&buffer, params.denoise_strength);
    let intensity = edge::detect_edges(&denoised, params.edge_sigma);
    let edge_mask = mask::threshold_map(&intensity, params.threshold);

    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&cmd.input, "edges", "png"));
    mask::mask_to_gray_image(&edge_mask).save(&output_path)?;
    println!("Edge mask PNG saved to {}", output_path.display());

    Ok(())
}

/// Derive an output path next to the input (or under `out_dir`) with the
/// format's extension.
fn derive_output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let mut path = match out_dir {
        Some(dir) => dir.join(input.file_name().unwrap_or_default()),
        None => input.to_path_buf(),
    };
    path.set_extension(extension);
    path
}

/// Derive a variant file path by appending a suffix before the extension.
fn derive_variant_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut derived = input.to_path_buf();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suffix.to_string());
    derived.set_file_name(format!("{stem}-{suffix}.{extension}"));
    derived
}
