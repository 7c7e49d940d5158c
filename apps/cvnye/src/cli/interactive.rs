//! Interactive session — walks the workflow one step at a time on a terminal.
//!
//! Generic over the reader and writer so a scripted session can drive it in
//! tests exactly as a user would.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::warn;

use crate::cli::display::{format_review, spawn_progress_printer};
use crate::export::save_pdf;
use crate::models::{Engagement, TargetKind, UserContext};
use crate::render::{render_document, Template};
use crate::workflow::{Workflow, WorkflowState};

/// Line that ends a pasted CV block.
const END_OF_BLOCK: &str = ".";

/// Typed alone instead of CV text, returns to the context questions.
const BACK_COMMAND: &str = "back";

struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    /// `None` once input is exhausted.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.write_all(b" ").await?;
        self.out.flush().await?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Lines up to a lone `.` or end of input, joined with newlines. A first
    /// line equal to `BACK_COMMAND` ends the block on its own.
    async fn read_block(&mut self) -> Result<Option<String>> {
        let mut block = Vec::new();
        loop {
            match self.lines.next_line().await? {
                Some(line) if block.is_empty() && line.trim() == BACK_COMMAND => {
                    return Ok(Some(BACK_COMMAND.to_string()))
                }
                Some(line) if line.trim() == END_OF_BLOCK => break,
                Some(line) => block.push(line),
                None if block.is_empty() => return Ok(None),
                None => break,
            }
        }
        Ok(Some(block.join("\n")))
    }
}

enum Step {
    Continue,
    Quit,
}

/// Runs the session until the user quits or input ends.
pub async fn run_session<R, W>(
    workflow: &mut Workflow,
    reader: R,
    writer: W,
    out_dir: &Path,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut term = Terminal {
        lines: reader.lines(),
        out: writer,
    };

    loop {
        let step = match workflow.state() {
            WorkflowState::Welcome => welcome(workflow, &mut term).await?,
            WorkflowState::Context => collect_context(workflow, &mut term).await?,
            WorkflowState::Input => collect_input(workflow, &mut term).await?,
            WorkflowState::Review => review(workflow, &mut term, out_dir).await?,
            WorkflowState::Processing => {
                anyhow::bail!("workflow left in processing between steps")
            }
        };
        if let Step::Quit = step {
            return Ok(());
        }
    }
}

async fn welcome<R, W>(workflow: &mut Workflow, term: &mut Terminal<R, W>) -> Result<Step>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    term.say("CVNyé - tailor your CV to where you want to go next.")
        .await?;
    if term.ask("Press Enter to start.").await?.is_none() {
        return Ok(Step::Quit);
    }
    workflow.start()?;
    Ok(Step::Continue)
}

async fn collect_context<R, W>(workflow: &mut Workflow, term: &mut Terminal<R, W>) -> Result<Step>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Coming back from the input step, the submitted answers are the defaults.
    let previous = workflow.context().cloned();

    let domain_prompt = match &previous {
        Some(ctx) => format!("Domain ({}):", ctx.domain),
        None => "Domain (e.g. Fintech):".to_string(),
    };
    let Some(mut domain) = term.ask(&domain_prompt).await? else {
        return Ok(Step::Quit);
    };
    if let (true, Some(ctx)) = (domain.is_empty(), &previous) {
        domain = ctx.domain.clone();
    }

    let default_target = previous.as_ref().map(|ctx| ctx.target).unwrap_or_default();
    let target = loop {
        let prompt = format!(
            "Target [job/internship/contract/remote] ({}):",
            choice_name(default_target)
        );
        let Some(answer) = term.ask(&prompt).await? else {
            return Ok(Step::Quit);
        };
        match parse_choice(&answer, default_target) {
            Some(target) => break target,
            None => term.say(&format!("Unknown target '{answer}'.")).await?,
        }
    };

    let default_duration = previous.as_ref().map(|ctx| ctx.duration).unwrap_or_default();
    let duration = loop {
        let prompt = format!(
            "Duration [short-term/long-term] ({}):",
            choice_name(default_duration)
        );
        let Some(answer) = term.ask(&prompt).await? else {
            return Ok(Step::Quit);
        };
        match parse_choice(&answer, default_duration) {
            Some(duration) => break duration,
            None => term.say(&format!("Unknown duration '{answer}'.")).await?,
        }
    };

    let Some(mut info) = term.ask("Anything else we should know? (optional):").await? else {
        return Ok(Step::Quit);
    };
    if let (true, Some(ctx)) = (info.is_empty(), &previous) {
        info = ctx.additional_info.clone();
    }

    let context = UserContext::new(domain, target, duration).with_additional_info(info);
    if let Err(err) = workflow.submit_context(context) {
        term.say(&err.user_message()).await?;
    }
    Ok(Step::Continue)
}

async fn collect_input<R, W>(workflow: &mut Workflow, term: &mut Terminal<R, W>) -> Result<Step>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let has_previous = !workflow.raw_input().trim().is_empty();
    if has_previous {
        term.say("Paste new CV text, or enter '.' alone to reuse the current text ('back' to change the context).")
            .await?;
    } else {
        term.say("Paste your CV text, then a line with a single '.' ('back' to change the context):")
            .await?;
    }

    let Some(block) = term.read_block().await? else {
        return Ok(Step::Quit);
    };
    if block.trim() == BACK_COMMAND {
        workflow.back_to_context()?;
        return Ok(Step::Continue);
    }
    if !block.trim().is_empty() || !has_previous {
        workflow.set_raw_input(block)?;
    }

    if !workflow.can_generate() {
        term.say("Please paste some CV text first.").await?;
        return Ok(Step::Continue);
    }

    let printer = spawn_progress_printer(workflow.subscribe_progress());
    let outcome = workflow.generate().await.map(|_| ());
    printer.abort();

    if let Err(err) = outcome {
        warn!("Generation failed: {err}");
        let message = workflow
            .error()
            .map(str::to_string)
            .unwrap_or_else(|| err.user_message());
        term.say(&format!("Error: {message}")).await?;
    }
    Ok(Step::Continue)
}

async fn review<R, W>(
    workflow: &mut Workflow,
    term: &mut Terminal<R, W>,
    out_dir: &Path,
) -> Result<Step>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let view = workflow
        .review()
        .context("review step without analysis results")?;
    term.say(&format_review(&view)).await?;

    loop {
        let Some(command) = term
            .ask("[template <modern|classic|minimal|luxury> | export | edit | new | quit]>")
            .await?
        else {
            return Ok(Step::Quit);
        };
        let (verb, arg) = match command.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (command.as_str(), ""),
        };

        match verb {
            "template" => match Template::from_str(arg, true) {
                Ok(template) => {
                    workflow.select_template(template);
                    return Ok(Step::Continue);
                }
                Err(_) => term.say(&format!("Unknown template '{arg}'.")).await?,
            },
            "export" => {
                let Some(view) = workflow.review() else {
                    return Ok(Step::Continue);
                };
                let doc = render_document(view.record, view.template);
                match save_pdf(doc, view.record, out_dir).await {
                    Ok(path) => term.say(&format!("Saved {}", path.display())).await?,
                    Err(err) => term.say(&format!("Export failed: {}", err.user_message())).await?,
                }
            }
            "edit" => {
                workflow.edit_input()?;
                return Ok(Step::Continue);
            }
            "new" => {
                workflow.reset();
                return Ok(Step::Continue);
            }
            "quit" | "exit" => return Ok(Step::Quit),
            "" => {}
            other => term.say(&format!("Unknown command '{other}'.")).await?,
        }
    }
}

/// Blank answers take `default`.
fn parse_choice<T: ValueEnum>(answer: &str, default: T) -> Option<T> {
    if answer.trim().is_empty() {
        return Some(default);
    }
    T::from_str(answer.trim(), true).ok()
}

fn choice_name<T: ValueEnum>(value: T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}
