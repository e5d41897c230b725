use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use polyscribe::application::services::{scribe_batch, translate_text};
use polyscribe::domain::normalize;
use polyscribe::infrastructure::transcription::TranscriberFactory;
use polyscribe::infrastructure::translation::TranslatorFactory;
use polyscribe::presentation::{format_json, format_text, Settings};

#[derive(Parser)]
#[command(name = "polyscribe")]
#[command(about = "Audio transcription and translation across speech and LLM providers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe audio files, translating into the target language.
    Transcribe {
        /// Audio files to process.
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Source language code (e.g. "hi", "pt-BR").
        #[arg(long = "from")]
        from_lang: Option<String>,

        /// Target language code.
        #[arg(long = "to")]
        to_lang: Option<String>,

        /// Transcription model as "{provider}/{model}".
        #[arg(long)]
        transcription_model: Option<String>,

        /// Translation model as "{provider}/{model}".
        #[arg(long)]
        translation_model: Option<String>,

        #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,

        #[arg(long)]
        output_folder: Option<PathBuf>,

        /// Maximum number of files processed in parallel.
        #[arg(long)]
        concurrency: Option<usize>,

        /// Regional batch job timeout in seconds.
        #[arg(long)]
        job_timeout: Option<u64>,

        /// Include segment timestamps in the output.
        #[arg(long)]
        timestamps: bool,
    },

    /// Translate a text file between two languages.
    Translate {
        file: PathBuf,

        /// Source language code.
        #[arg(long = "from")]
        from_lang: String,

        /// Target language code.
        #[arg(long = "to")]
        to_lang: Option<String>,

        #[arg(long)]
        output_folder: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,polyscribe=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Transcribe {
            sources,
            from_lang,
            to_lang,
            transcription_model,
            translation_model,
            output_format,
            output_folder,
            concurrency,
            job_timeout,
            timestamps,
        } => {
            run_transcribe(TranscribeArgs {
                sources,
                from_lang,
                to_lang,
                transcription_model,
                translation_model,
                output_format,
                output_folder,
                concurrency,
                job_timeout,
                timestamps,
            })
            .await
        }
        Command::Translate {
            file,
            from_lang,
            to_lang,
            output_folder,
        } => run_translate(file, from_lang, to_lang, output_folder).await,
    }
}

struct TranscribeArgs {
    sources: Vec<PathBuf>,
    from_lang: Option<String>,
    to_lang: Option<String>,
    transcription_model: Option<String>,
    translation_model: Option<String>,
    output_format: OutputFormat,
    output_folder: Option<PathBuf>,
    concurrency: Option<usize>,
    job_timeout: Option<u64>,
    timestamps: bool,
}

async fn run_transcribe(args: TranscribeArgs) -> Result<()> {
    let settings = Settings::load()?;

    let target_language = args.to_lang.unwrap_or(settings.target_language);
    let concurrency = args.concurrency.unwrap_or(settings.concurrency);
    let job_timeout =
        Duration::from_secs(args.job_timeout.unwrap_or(settings.job_timeout_secs));
    let transcription_model = args
        .transcription_model
        .unwrap_or(settings.transcription_model);
    let translation_model = args.translation_model.unwrap_or(settings.translation_model);

    for source in &args.sources {
        if !source.exists() {
            bail!("file not found: {}", source.display());
        }
    }

    if let Some(folder) = &args.output_folder {
        std::fs::create_dir_all(folder)
            .with_context(|| format!("creating output folder {}", folder.display()))?;
    }

    let pending: Vec<PathBuf> = args
        .sources
        .iter()
        .filter(|p| !output_path_for(p, args.output_folder.as_deref()).exists())
        .cloned()
        .collect();
    let skipped = args.sources.len() - pending.len();
    if skipped > 0 {
        println!("Skipping {} already transcribed file(s)", skipped);
    }
    if pending.is_empty() {
        return Ok(());
    }

    let transcriber = TranscriberFactory::create(
        &transcription_model,
        &settings.regional_transcription_model,
        args.from_lang.as_deref(),
        &target_language,
        job_timeout,
    )?;
    let translator = TranslatorFactory::create(
        &translation_model,
        &settings.regional_translation_model,
        args.from_lang.as_deref().unwrap_or("auto"),
        &target_language,
    )?;

    let results = scribe_batch(
        &pending,
        transcriber,
        translator,
        args.from_lang.as_deref(),
        &target_language,
        args.timestamps,
        concurrency,
    )
    .await;

    let mut failures = 0;
    for (path, result) in pending.iter().zip(results) {
        match result {
            Ok(result) => {
                let output = match args.output_format {
                    OutputFormat::Text => format_text(&result, args.timestamps),
                    OutputFormat::Json => format_json(&result),
                };
                let out_path = output_path_for(path, args.output_folder.as_deref());
                std::fs::write(&out_path, output)
                    .with_context(|| format!("writing {}", out_path.display()))?;
                println!("{} -> {}", path.display(), out_path.display());
            }
            Err(e) => {
                failures += 1;
                eprintln!("FAILED {}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        bail!("{} file(s) failed", failures);
    }
    Ok(())
}

async fn run_translate(
    file: PathBuf,
    from_lang: String,
    to_lang: Option<String>,
    output_folder: Option<PathBuf>,
) -> Result<()> {
    let settings = Settings::load()?;
    let target_language = to_lang.unwrap_or(settings.target_language);

    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;

    let translator = TranslatorFactory::create(
        &settings.translation_model,
        &settings.regional_translation_model,
        &from_lang,
        &target_language,
    )?
    .ok_or_else(|| {
        anyhow::anyhow!(
            "source and target language are both '{}'; nothing to translate",
            normalize(&from_lang)
        )
    })?;

    let translation =
        translate_text(&text, translator.as_ref(), &from_lang, &target_language).await?;

    if let Some(folder) = &output_folder {
        std::fs::create_dir_all(folder)
            .with_context(|| format!("creating output folder {}", folder.display()))?;
    }
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "translation".to_string());
    let folder = output_folder
        .or_else(|| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let out_path = folder.join(format!("{}.{}.txt", stem, normalize(&target_language)));

    std::fs::write(&out_path, translation.text)
        .with_context(|| format!("writing {}", out_path.display()))?;
    println!("{} -> {}", file.display(), out_path.display());
    Ok(())
}

fn output_path_for(audio_path: &Path, output_folder: Option<&Path>) -> PathBuf {
    let folder = output_folder
        .map(Path::to_path_buf)
        .or_else(|| audio_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let stem = audio_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    folder.join(format!("{}.txt", stem))
}
