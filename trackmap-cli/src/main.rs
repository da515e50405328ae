use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use anyhow::Result;
use trackmap_core::{Chart, Coord, Frame, MonospaceMeasurer};
use trackmap_render::SvgExporter;

mod config;
mod error;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "trackmap")]
#[command(about = "Trackmap - stacked feature maps for genomic annotations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out features and export an SVG
    Render {
        /// Input BED or GenBank file (optionally gzipped)
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Chart title drawn above the scale
        #[arg(long)]
        title: Option<String>,

        /// Add a footer with version, range and timestamp
        #[arg(long)]
        footer: bool,
    },

    /// Print the computed layout without drawing it
    Layout {
        /// Input BED or GenBank file (optionally gzipped)
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        format: LayoutFormat,
    },

    /// Configuration helpers
    Config {
        /// Print an example configuration file
        #[arg(long)]
        example: bool,

        /// Write the example configuration to this path instead
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct ViewArgs {
    /// Configuration file (defaults to ./trackmap.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Display width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Only keep features overlapping [from, to]
    #[arg(long, requires = "to", allow_hyphen_values = true)]
    from: Option<Coord>,

    #[arg(long, requires = "from", allow_hyphen_values = true)]
    to: Option<Coord>,

    /// Explicit range minimum
    #[arg(long, allow_hyphen_values = true)]
    min: Option<Coord>,

    /// Explicit range maximum
    #[arg(long, allow_hyphen_values = true)]
    max: Option<Coord>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutFormat {
    /// One line per track
    Summary,
    /// Full frame as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Render { input, output, view, title, footer } => {
            cmd_render(&input, &output, &view, title, footer)
        }
        Commands::Layout { input, view, format } => cmd_layout(&input, &view, format),
        Commands::Config { example, output } => cmd_config(example, output),
    };

    if let Err(err) = result {
        match err.downcast::<CliError>() {
            Ok(cli_err) => print_error_and_exit(&cli_err),
            Err(other) => {
                eprintln!("Error: {:#}", other);
                std::process::exit(1);
            }
        }
    }
}

/// Load the configuration, apply command-line overrides and build the chart.
fn build_chart(input: &Path, view: &ViewArgs) -> Result<(Config, Chart)> {
    let mut config = Config::load(view.config.as_deref())?;
    if let Some(width) = view.width {
        config.chart.display_width = width;
    }
    if view.min.is_some() {
        config.chart.scale.min = view.min;
    }
    if view.max.is_some() {
        config.chart.scale.max = view.max;
    }

    let features = trackmap_core::io::load_features(input)
        .map_err(|e| CliError::from_layout(input, e))?;
    let mut chart = Chart::new(config.chart.clone()).map_err(CliError::from)?;
    chart.load_features(features);
    log::info!(
        "Placed {} features in {} tracks",
        chart.feature_count(),
        chart.track_count()
    );

    if let (Some(from), Some(to)) = (view.from, view.to) {
        chart = chart.slice(from, to);
        // Slicing resets the scale; re-apply an explicit range if one was given
        if let (Some(min), Some(max)) = (view.min, view.max) {
            chart.set_range(min, max).map_err(CliError::from)?;
        }
        log::info!(
            "Slice {}..{} keeps {} features in {} tracks",
            from,
            to,
            chart.feature_count(),
            chart.track_count()
        );
    }

    Ok((config, chart))
}

fn layout_frame(chart: &Chart, measurer: &MonospaceMeasurer) -> Result<Frame> {
    let frame = chart.frame(measurer).map_err(CliError::from)?;
    Ok(frame)
}

fn cmd_render(
    input: &Path,
    output: &Path,
    view: &ViewArgs,
    title: Option<String>,
    footer: bool,
) -> Result<()> {
    let extension = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !extension.eq_ignore_ascii_case("svg") {
        return Err(CliError::invalid_format(format!(
            "unsupported output format '{}', only .svg is supported",
            extension
        ))
        .into());
    }

    let (mut config, chart) = build_chart(input, view)?;
    if title.is_some() {
        config.export.title = title;
    }
    config.export.show_footer |= footer;

    let measurer = MonospaceMeasurer::default();
    let frame = layout_frame(&chart, &measurer)?;
    if frame.is_empty() {
        log::warn!("No features to draw; writing an empty chart");
    }

    SvgExporter::new(config.export)
        .export_svg(output, &frame, &measurer)
        .map_err(|e| CliError::rendering(format!("{:#}", e)))?;
    log::info!(
        "Rendered {}x{} chart to {}",
        frame.width,
        frame.height,
        output.display()
    );
    Ok(())
}

struct TrackSummary {
    track: usize,
    features: usize,
    first: Coord,
    last_end: Coord,
}

fn cmd_layout(input: &Path, view: &ViewArgs, format: LayoutFormat) -> Result<()> {
    let (_, chart) = build_chart(input, view)?;
    match format {
        LayoutFormat::Json => {
            let frame = layout_frame(&chart, &MonospaceMeasurer::default())?;
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
        LayoutFormat::Summary => {
            match chart.render_range().map_err(CliError::from)? {
                Some(range) => println!("range\t{}\t{}", range.min, range.max),
                None => println!("range\t-\t-"),
            }
            for summary in track_summaries(&chart) {
                println!(
                    "track {}\t{} features\t{}..{}",
                    summary.track, summary.features, summary.first, summary.last_end
                );
            }
        }
    }
    Ok(())
}

fn track_summaries(chart: &Chart) -> Vec<TrackSummary> {
    chart
        .tracks()
        .iter()
        .enumerate()
        .filter_map(|(index, track)| {
            let first = track.features().first()?;
            let last = track.last()?;
            Some(TrackSummary {
                track: index,
                features: track.len(),
                first: first.position,
                last_end: last.end(),
            })
        })
        .collect()
}

fn cmd_config(example: bool, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            Config::default().save_to_file(&path)?;
            log::info!("Wrote example configuration to {}", path.display());
        }
        None if example => print!("{}", Config::example_toml()?),
        None => {
            let loaded = Config::load(None)?;
            print!("{}", toml::to_string_pretty(&loaded).map_err(CliError::from)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_bed(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("genes.bed");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "chr1\t100\t500\tlacZ\t0\t+").unwrap();
        writeln!(file, "chr1\t300\t700\tlacY\t0\t-").unwrap();
        writeln!(file, "chr1\t900\t1200\tlacA\t0\t+").unwrap();
        path
    }

    fn view() -> ViewArgs {
        ViewArgs {
            config: Some(PathBuf::from("/nonexistent/trackmap.toml")),
            width: None,
            from: None,
            to: None,
            min: None,
            max: None,
        }
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "trackmap", "render", "genes.bed", "-o", "out.svg", "--min", "-100", "--max", "900",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { view, .. } => {
                assert_eq!(view.min, Some(-100));
                assert_eq!(view.max, Some(900));
                assert_eq!(view.from, None);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_from_requires_to() {
        assert!(Cli::try_parse_from(["trackmap", "layout", "genes.bed", "--from", "5"]).is_err());
    }

    #[test]
    fn test_build_chart_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let bed = write_bed(&dir);
        let config_path = dir.path().join("trackmap.toml");
        std::fs::write(&config_path, "[chart]\ndisplay_width = 400\n").unwrap();

        let mut args = view();
        args.config = Some(config_path);
        args.width = Some(600);
        let (config, chart) = build_chart(&bed, &args).unwrap();

        assert_eq!(config.chart.display_width, 600);
        assert_eq!(chart.config().display_width, 600);
        assert_eq!(chart.track_count(), 2);

        let summaries = track_summaries(&chart);
        assert_eq!(summaries[0].features, 2);
        assert_eq!(summaries[0].first, 100);
        assert_eq!(summaries[0].last_end, 1200);
        assert_eq!(summaries[1].features, 1);
    }

    #[test]
    fn test_build_chart_slice() {
        let dir = tempfile::tempdir().unwrap();
        let bed = write_bed(&dir);
        let config_path = dir.path().join("trackmap.toml");
        std::fs::write(&config_path, "").unwrap();

        let mut args = view();
        args.config = Some(config_path);
        args.from = Some(800);
        args.to = Some(1000);
        let (_, chart) = build_chart(&bed, &args).unwrap();
        assert_eq!(chart.feature_count(), 1);
        assert_eq!(chart.track_count(), 1);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("trackmap.toml");
        std::fs::write(&config_path, "").unwrap();
        let mut args = view();
        args.config = Some(config_path);

        let err = build_chart(&dir.path().join("absent.bed"), &args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let bed = write_bed(&dir);
        let config_path = dir.path().join("trackmap.toml");
        std::fs::write(&config_path, "").unwrap();
        let out = dir.path().join("map.svg");

        let mut args = view();
        args.config = Some(config_path);
        cmd_render(&bed, &out, &args, Some("lac operon".to_string()), false).unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("lac operon"));
        assert_eq!(svg.matches("<polygon").count(), 3);
    }

    #[test]
    fn test_render_rejects_png() {
        let dir = tempfile::tempdir().unwrap();
        let bed = write_bed(&dir);
        let config_path = dir.path().join("trackmap.toml");
        std::fs::write(&config_path, "").unwrap();

        let mut args = view();
        args.config = Some(config_path);
        let err = cmd_render(&bed, &dir.path().join("map.png"), &args, None, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidFormat { .. })
        ));
    }
}
