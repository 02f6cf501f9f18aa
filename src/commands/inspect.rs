use crate::*;
use std::path::Path;

pub fn handle_score(cli: &Cli, catalog: &Catalog, palette: Palette, file: &Path) -> anyhow::Result<()> {
    let checkpoint = load_for_catalog(file, catalog)?;
    let result = score(&checkpoint.responses);
    if cli.json {
        return print_one(true, result, |_| String::new());
    }
    print!("{}", render_summary(&palette, &result));
    for gap in &result.compliance_gaps {
        println!("{}\t{}\t{}", gap.priority, gap.nist_control, gap.title);
    }
    Ok(())
}

pub fn handle_report(
    cli: &Cli,
    catalog: &Catalog,
    file: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let checkpoint = load_for_catalog(file, catalog)?;
    let result = score(&checkpoint.responses);
    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| report_path_for(file));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, render_markdown(catalog, &checkpoint, &result))?;
    tracing::info!(path = %path.display(), "report written");

    let written = ReportWritten {
        report: path.display().to_string(),
        complete: checkpoint.is_complete(),
        answered: checkpoint.responses.len(),
    };
    print_one(cli.json, written, |w| {
        if w.complete {
            format!("report written to {}", w.report)
        } else {
            format!("draft report ({} answers) written to {}", w.answered, w.report)
        }
    })
}

pub fn handle_questions(cli: &Cli, catalog: &Catalog, group: Option<&str>) -> anyhow::Result<()> {
    if let Some(key) = group {
        if catalog.group(key).is_none() {
            anyhow::bail!("unknown question group: {}", key);
        }
    }
    let rows: Vec<QuestionRow> = catalog
        .groups()
        .iter()
        .filter(|g| group.map(|k| k == g.key).unwrap_or(true))
        .flat_map(|g| {
            g.questions.iter().map(|q| QuestionRow {
                group: g.key,
                question: *q,
            })
        })
        .collect();
    print_out(cli.json, &rows, |r| {
        let dep = r
            .question
            .depends_on
            .map(|d| format!("\t(after {})", d.question))
            .unwrap_or_default();
        let text = r.question.text.split_whitespace().collect::<Vec<_>>().join(" ");
        format!("{}\t{}\t{}{}", r.question.id, r.question.kind, text, dep)
    })
}

pub fn handle_validate(cli: &Cli, catalog: &Catalog) -> anyhow::Result<()> {
    validate(catalog, WORDING_ANCHORS)?;
    let summary = CatalogSummary {
        groups: catalog.groups().len(),
        questions: catalog.len(),
        rules: RULES.len(),
    };
    print_one(cli.json, summary, |s| {
        format!(
            "catalog valid: {} groups, {} questions, {} rules",
            s.groups, s.questions, s.rules
        )
    })
}
