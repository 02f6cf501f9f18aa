use crate::*;
use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const INTRO: &str = "\
This tool guides you through a structured scoping assessment to determine:

  1. Which of your systems process, store, or transmit CUI or FCI
  2. The boundary of your CMMC assessment scope
  3. Which NIST SP 800-171 controls apply to your environment
  4. Whether an enclave would reduce your scope

  CUI  = Controlled Unclassified Information (requires CMMC Level 2)
  FCI  = Federal Contract Information (requires CMMC Level 1 minimum)

Progress is saved after every answer. Stop at any time with Ctrl+C or by
closing input (Ctrl+D), then continue later with --resume.";

pub fn handle_assess(
    cli: &Cli,
    cfg: &ConfigFile,
    catalog: &Catalog,
    output: Option<&Path>,
    resume: Option<&Path>,
) -> anyhow::Result<()> {
    let mode = resolve_color(cli.color, cfg);
    // under --json the prompts share stderr with logs, so stay plain unless forced
    let palette = match (cli.json, mode) {
        (true, ColorMode::Always) => Palette::new(true),
        (true, _) => Palette::plain(),
        (false, m) => Palette::for_mode(m),
    };

    let checkpoint = match resume {
        Some(path) => load_for_catalog(path, catalog)?,
        None => Checkpoint::start(),
    };
    let out_path: PathBuf = match (output, resume) {
        (Some(p), _) => p.to_path_buf(),
        (None, Some(r)) => r.to_path_buf(),
        (None, None) => default_output_path(Path::new(&cfg.general.reports_dir)),
    };

    let sink: Box<dyn Write> = if cli.json {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };
    let stdin = std::io::stdin();
    let mut collector = TerminalCollector::new(stdin.lock(), sink, palette);

    let outcome = run_assessment(
        catalog,
        checkpoint,
        &mut collector,
        &out_path,
        resume,
        palette,
    );
    drop(collector);
    let report = match outcome {
        Ok(done) => done,
        Err(err) if out_path.exists() => {
            return Err(err.context(format!("progress saved to {}", out_path.display())))
        }
        Err(err) => return Err(err),
    };

    if cli.json {
        print_one(true, report, |_| String::new())?;
    } else {
        println!("{}", render_summary(&palette, &report.score));
        println!(
            "{}",
            palette.paint(&format!("  Scoping report saved to: {}", report.report), Style::Good)
        );
        println!(
            "{}",
            palette.paint(&format!("  Raw data saved to:       {}", report.output), Style::Good)
        );
        if report.score.enclave_recommended {
            println!(
                "\n{}",
                palette.paint(
                    "  An enclave is recommended to reduce your CMMC scope.",
                    Style::Warn
                )
            );
        }
    }
    Ok(())
}

/// Metadata, questionnaire, scoring and report, checkpointing along the way.
pub fn run_assessment<R: BufRead, W: Write>(
    catalog: &Catalog,
    checkpoint: Checkpoint,
    collector: &mut TerminalCollector<R, W>,
    out_path: &Path,
    resumed_from: Option<&Path>,
    palette: Palette,
) -> anyhow::Result<AssessReport> {
    let Checkpoint {
        mut metadata,
        mut responses,
        ..
    } = checkpoint;

    collector.say(&palette.paint("\n  CMMC CUI / FCI Scoping Assessment", Style::Heading))?;
    collector.say(&format!("\n{}\n", INTRO))?;
    if let Some(path) = resumed_from {
        collector.say(&palette.paint(
            &format!(
                "  Resuming assessment from: {} ({} answers recorded)\n",
                path.display(),
                responses.len()
            ),
            Style::Warn,
        ))?;
    }

    if !metadata.has_organization() {
        collector.say(&palette.paint("  ORGANIZATION INFORMATION\n", Style::Bold))?;
        metadata.organization = Some(collector.ask_field("Company / Organization name", true)?);
        metadata.cage_code =
            non_empty(collector.ask_field("CAGE Code (if known, or press ENTER to skip)", false)?);
        metadata.assessor = Some(collector.ask_field("Person completing this assessment", true)?);
        metadata.contract_ref =
            non_empty(collector.ask_field("Primary DoD contract number (or press ENTER)", false)?);
        collector.say("")?;
        save_checkpoint(
            out_path,
            &Checkpoint {
                metadata: metadata.clone(),
                responses: responses.clone(),
                score: None,
            },
        )?;
    }

    let summary = resolver::run(catalog, &mut responses, collector, |store| {
        save_checkpoint(
            out_path,
            &Checkpoint {
                metadata: metadata.clone(),
                responses: store.clone(),
                score: None,
            },
        )
    })?;

    let result = score(&responses);
    metadata.completed_at = Some(chrono::Local::now().to_rfc3339());
    let finished = Checkpoint {
        metadata,
        responses,
        score: Some(result.clone()),
    };
    save_checkpoint(out_path, &finished)?;

    let report_path = report_path_for(out_path);
    std::fs::write(&report_path, render_markdown(catalog, &finished, &result))
        .with_context(|| format!("writing report {}", report_path.display()))?;
    tracing::info!(path = %report_path.display(), "report written");

    Ok(AssessReport {
        output: out_path.display().to_string(),
        report: report_path.display().to_string(),
        presented: summary.presented.len(),
        already_answered: summary.already_answered.len(),
        skipped: summary.skipped.len(),
        score: result,
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
