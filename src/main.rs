use clap::{Args, Parser, Subcommand, ValueEnum};
use dossier::docx::{ensure_template, template_status, write_template};
use dossier::types::{EvidenceImage, ReportFields};
use dossier::{ConfigError, DocxReportService, PdfReportService, ReportConfig, ReportError, ReportRenderer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Generate security incident reports as DOCX or PDF.
#[derive(Parser)]
#[command(name = "dossier", version)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Template path (overrides the configuration)
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Organization printed in the report (overrides the configuration)
    #[arg(long, global = true)]
    organization: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Render one report from a JSON field file
    Generate {
        /// Report fields as camelCase JSON
        #[arg(short, long)]
        fields: PathBuf,

        /// Evidence image, in figure order. Can be given multiple times.
        #[arg(short, long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Docx)]
        format: Format,

        /// Directory the report is written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Logo for the PDF title block
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    /// Create the template if it is missing or stale
    Template {
        /// Rewrite the template even when it is current
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Docx,
    Pdf,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] dossier::docx::DocxError),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fields file {}: {source}", path.display())]
    Fields {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write report: {0}")]
    Write(#[source] std::io::Error),
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(args: &ConfigArgs) -> Result<ReportConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if let Some(template) = &args.template {
        config = config.with_template_path(template);
    }
    if let Some(organization) = &args.organization {
        config = config.with_organization(organization);
    }
    Ok(config)
}

fn evidence(paths: &[PathBuf]) -> Result<Vec<EvidenceImage>, CliError> {
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(EvidenceImage::new(name, read(path)?))
        })
        .collect()
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(&cli.config)?;
    match cli.command {
        Command::Generate {
            fields,
            images,
            format,
            output_dir,
            logo,
        } => {
            if let Some(dir) = output_dir {
                config = config.with_output_dir(dir);
            }
            if let Some(logo) = logo {
                config = config.with_logo_path(logo);
            }

            let raw = read(&fields)?;
            let report_fields: ReportFields =
                serde_json::from_slice(&raw).map_err(|source| CliError::Fields {
                    path: fields.clone(),
                    source,
                })?;
            let images = evidence(&images)?;

            let service: Box<dyn ReportRenderer> = match format {
                Format::Docx => Box::new(DocxReportService::new(&config)?),
                Format::Pdf => Box::new(PdfReportService::new(&config)),
            };
            let report = service.render(&report_fields, &images)?;
            let path = report.write_to(&config.output_dir).map_err(CliError::Write)?;
            println!("{}", path.display());
        }
        Command::Template { force } => {
            let before = template_status(&config.template_path);
            if force {
                write_template(&config.template_path, &config.organization)?;
                println!("{}: was {}, rewritten", config.template_path.display(), before);
            } else {
                let outcome = ensure_template(&config.template_path, &config.organization)?;
                println!("{}: was {}, {:?}", config.template_path.display(), before, outcome);
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}
