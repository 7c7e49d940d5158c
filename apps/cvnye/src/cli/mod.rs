// Command-line surface. `generate` runs one pass end to end; `interactive`
// walks the same workflow step by step.

pub mod display;
pub mod input;
pub mod interactive;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

use crate::cli::display::{format_review, spawn_progress_printer};
use crate::cli::input::read_cv_input;
use crate::config::Config;
use crate::export::save_pdf;
use crate::models::{Engagement, TargetKind, UserContext};
use crate::render::{render_document, Template};
use crate::workflow::Workflow;

#[derive(Debug, Parser)]
#[command(
    name = "cvnye",
    version,
    about = "Tailor a CV to a career target with AI-driven analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyse and rewrite one CV, print the review and export a PDF
    Generate(GenerateArgs),
    /// Step through the workflow with prompts (default)
    Interactive(InteractiveArgs),
}

#[derive(Debug, Args, Clone)]
struct GenerateArgs {
    /// Professional domain, e.g. "Fintech"
    #[arg(long)]
    domain: String,
    #[arg(long, value_enum, default_value_t = TargetKind::Job)]
    target: TargetKind,
    #[arg(long, value_enum, default_value_t = Engagement::LongTerm)]
    duration: Engagement,
    /// Free-form notes passed to the analysis
    #[arg(long, default_value = "")]
    info: String,
    /// CV source: a text file, a PDF, or `-` for stdin
    #[arg(long, value_name = "FILE|-")]
    input: String,
    #[arg(long, value_enum, default_value_t = Template::Modern)]
    template: Template,
    /// Overrides CVNYE_OUTPUT_DIR
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Print the review without writing a PDF
    #[arg(long)]
    no_export: bool,
}

#[derive(Debug, Args, Clone, Default)]
struct InteractiveArgs {
    /// Overrides CVNYE_OUTPUT_DIR
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self, mut workflow: Workflow, config: &Config) -> Result<()> {
        match self.command {
            Some(Command::Generate(args)) => {
                let out_dir = args.out_dir.clone().unwrap_or_else(|| config.output_dir.clone());
                run_generate(&mut workflow, args, out_dir).await
            }
            Some(Command::Interactive(args)) => run_interactive(&mut workflow, args, config).await,
            None => run_interactive(&mut workflow, InteractiveArgs::default(), config).await,
        }
    }
}

async fn run_interactive(
    workflow: &mut Workflow,
    args: InteractiveArgs,
    config: &Config,
) -> Result<()> {
    let out_dir = args.out_dir.unwrap_or_else(|| config.output_dir.clone());
    interactive::run_session(
        workflow,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &out_dir,
    )
    .await
}

async fn run_generate(workflow: &mut Workflow, args: GenerateArgs, out_dir: PathBuf) -> Result<()> {
    let raw_input = read_cv_input(&args.input).await?;
    let context = UserContext::new(args.domain, args.target, args.duration)
        .with_additional_info(args.info);

    workflow.start()?;
    workflow.submit_context(context)?;
    workflow.set_raw_input(raw_input)?;
    workflow.select_template(args.template);

    let printer = spawn_progress_printer(workflow.subscribe_progress());
    let outcome = workflow.generate().await.map(|_| ());
    printer.abort();
    if let Err(err) = outcome {
        anyhow::bail!(err.user_message());
    }

    let view = workflow
        .review()
        .context("generation finished without review content")?;
    println!("{}", format_review(&view));

    if args.no_export {
        info!("Export skipped (--no-export)");
        return Ok(());
    }
    let doc = render_document(view.record, view.template);
    let path = save_pdf(doc, view.record, &out_dir).await?;
    println!("Saved {}", path.display());
    Ok(())
}
