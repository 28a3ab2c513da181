use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use letmecook_core::analysis::display_name;
use letmecook_core::{
    detect_ingredients, parse_recipes, preprocess_bytes, suggest_recipes, IngredientSelection,
    PipelineConfig, PreprocessOutput,
};

mod config;
mod gemini;

use config::{AppConfig, PipelineOverrides};
use gemini::GeminiClient;

/// Environment variable holding the Gemini API key
const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Parser)]
#[command(name = "letmecook")]
#[command(about = "Let Me Cook - snap your ingredients, get recipe ideas")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Gemini API key (defaults to the GEMINI_API_KEY environment variable)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(flatten)]
    overrides: PipelineOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-process a photo and write the payload and preview images
    Preprocess {
        /// PNG or JPEG photo
        input: PathBuf,

        /// Directory for compressed.jpg and enhanced.png
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Detect the ingredients visible in a photo
    Analyze {
        /// PNG or JPEG photo
        input: PathBuf,
    },
    /// Detect ingredients and suggest recipes
    Recipes {
        /// PNG or JPEG photo
        input: PathBuf,

        /// Leave a detected ingredient out (repeatable)
        #[arg(short = 'x', long = "exclude")]
        exclude: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "letmecook=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.overrides.apply(&mut config.pipeline);
    config
        .pipeline
        .validate()
        .context("Invalid pipeline configuration")?;

    match cli.command {
        Commands::Preprocess { input, out_dir } => {
            run_preprocess_command(&input, &out_dir, &config.pipeline)
        }
        Commands::Analyze { input } => run_analyze_command(&input, &config, cli.api_key),
        Commands::Recipes { input, exclude } => {
            run_recipes_command(&input, &exclude, &config, cli.api_key)
        }
    }
}

/// Run the pipeline and save both images
fn run_preprocess_command(
    input: &Path,
    out_dir: &Path,
    config: &PipelineConfig,
) -> anyhow::Result<()> {
    let output = preprocess_file(input, config)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let payload_path = out_dir.join(format!(
        "compressed.{}",
        output.payload.format().extension()
    ));
    std::fs::write(&payload_path, output.payload.as_bytes())
        .with_context(|| format!("Failed to write {}", payload_path.display()))?;
    println!(
        "Wrote {} ({}x{}, {} bytes)",
        payload_path.display(),
        output.compressed.width,
        output.compressed.height,
        output.payload.len()
    );

    match &output.enhanced {
        Ok(enhanced) => {
            let enhanced_path = out_dir.join("enhanced.png");
            enhanced
                .to_dynamic()
                .context("Enhanced image has an invalid pixel buffer")?
                .save_with_format(&enhanced_path, ImageFormat::Png)
                .with_context(|| format!("Failed to write {}", enhanced_path.display()))?;
            println!("Wrote {}", enhanced_path.display());
        }
        Err(e) => {
            println!("Skipped enhanced.png: {e}");
        }
    }
    Ok(())
}

/// Pre-process a photo and list its ingredients
fn run_analyze_command(
    input: &Path,
    config: &AppConfig,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let output = preprocess_file(input, &config.pipeline)?;
    let client = GeminiClient::new(&config.model, resolve_api_key(api_key)?)?;

    let ingredients = detect_ingredients(&client, &output.payload)?;
    println!("Detected ingredients:");
    for ingredient in &ingredients {
        println!("- {}", display_name(ingredient));
    }
    Ok(())
}

/// Pre-process a photo, detect ingredients, and print recipe suggestions
fn run_recipes_command(
    input: &Path,
    exclude: &[String],
    config: &AppConfig,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let output = preprocess_file(input, &config.pipeline)?;
    let client = GeminiClient::new(&config.model, resolve_api_key(api_key)?)?;

    let mut selection = IngredientSelection::new(detect_ingredients(&client, &output.payload)?);
    for name in exclude {
        if !selection.set(&name.to_lowercase(), false) {
            tracing::warn!(ingredient = %name, "Excluded ingredient was not detected");
        }
    }

    for (name, selected) in selection.iter() {
        let mark = if selected { "x" } else { " " };
        println!("[{mark}] {}", display_name(name));
    }
    if selection.none_selected() {
        bail!("Please select at least one ingredient");
    }

    let text = suggest_recipes(&client, &selection.selected())?;
    let recipes = parse_recipes(&text);
    if recipes.is_empty() {
        tracing::warn!("Recipe answer had no recognizable sections, printing it as is");
        println!("\n{text}");
        return Ok(());
    }

    for recipe in &recipes {
        println!("\n## {}", recipe.name());
        for line in recipe.title.lines().skip(1) {
            if !line.trim().is_empty() {
                println!("{}", line.trim());
            }
        }
        println!("\n{}", recipe.body);
    }
    Ok(())
}

fn preprocess_file(input: &Path, config: &PipelineConfig) -> anyhow::Result<PreprocessOutput> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    preprocess_bytes(&bytes, config)
        .with_context(|| format!("Failed to pre-process {}", input.display()))
}

/// The `--api-key` flag wins over the environment
fn resolve_api_key(flag: Option<String>) -> anyhow::Result<String> {
    flag.or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
        .with_context(|| format!("No API key: set {API_KEY_ENV} or pass --api-key"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recipes_command() {
        let cli = Cli::try_parse_from([
            "letmecook",
            "recipes",
            "fridge.jpg",
            "-x",
            "Garlic",
            "--exclude",
            "egg",
            "--quality",
            "70",
        ])
        .unwrap();

        assert_eq!(cli.overrides.quality, Some(70));
        match cli.command {
            Commands::Recipes { input, exclude } => {
                assert_eq!(input, PathBuf::from("fridge.jpg"));
                assert_eq!(exclude, vec!["Garlic", "egg"]);
            }
            _ => panic!("expected recipes command"),
        }
    }

    #[test]
    fn test_resolve_api_key_prefers_flag() {
        assert_eq!(resolve_api_key(Some("abc".to_string())).unwrap(), "abc");
    }

    #[test]
    fn test_resolve_api_key_rejects_blank_flag() {
        assert!(resolve_api_key(Some("  ".to_string())).is_err());
    }

    #[test]
    fn test_preprocess_command_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plate.png");
        image::RgbImage::from_fn(64, 48, |x, y| image::Rgb([x as u8 * 3, y as u8 * 4, 100]))
            .save_with_format(&input, ImageFormat::Png)
            .unwrap();

        let out_dir = dir.path().join("out");
        run_preprocess_command(&input, &out_dir, &PipelineConfig::default()).unwrap();

        let jpeg = std::fs::read(out_dir.join("compressed.jpg")).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let enhanced = image::open(out_dir.join("enhanced.png")).unwrap();
        assert_eq!((enhanced.width(), enhanced.height()), (64, 48));
    }

    #[test]
    fn test_preprocess_command_skips_enhanced_for_tiny_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dot.png");
        image::RgbImage::from_pixel(1, 1, image::Rgb([10, 20, 30]))
            .save_with_format(&input, ImageFormat::Png)
            .unwrap();

        run_preprocess_command(&input, dir.path(), &PipelineConfig::default()).unwrap();
        assert!(dir.path().join("compressed.jpg").exists());
        assert!(!dir.path().join("enhanced.png").exists());
    }

    #[test]
    fn test_missing_input_has_context() {
        let err = preprocess_file(Path::new("/nonexistent/photo.jpg"), &PipelineConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
