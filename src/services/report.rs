//! Human-readable renderings of a scored assessment.

use crate::catalog::ids::{CAN_SEPARATE, WILLING_TO_ISOLATE};
use crate::catalog::Catalog;
use crate::domain::models::{
    Checkpoint, CmmcLevel, DerivedResult, Gap, Metadata, ResponseStore,
};
use crate::services::output::{Palette, Style};

const BOX_WIDTH: usize = 76;

fn yes_no(b: bool) -> &'static str {
    if b {
        "YES"
    } else {
        "NO"
    }
}

fn line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

/// Terminal results box. Padding is computed on the plain text so color
/// codes never skew the right border.
pub fn render_summary(palette: &Palette, result: &DerivedResult) -> String {
    let border = |s: &str| palette.paint(s, Style::Accent);
    let row = |label: &str, value: &str, style: Style| {
        let pad = BOX_WIDTH.saturating_sub(2 + label.len() + value.chars().count());
        format!(
            "  {}  {}{}{}{}",
            border("│"),
            label,
            palette.paint(value, style),
            " ".repeat(pad),
            border("│")
        )
    };
    let flag_style = |b: bool| if b { Style::Bad } else { Style::Good };
    let level_style = match result.cmmc_level_required {
        CmmcLevel::Level2 => Style::Bad,
        _ => Style::Warn,
    };
    let enclave_style = if result.enclave_recommended {
        Style::Warn
    } else {
        Style::Good
    };
    let rule = "─".repeat(BOX_WIDTH);
    let title = format!("{:^width$}", "SCOPING ASSESSMENT RESULTS", width = BOX_WIDTH);
    let gaps = format!(
        "{} ({} high)",
        result.gap_count,
        result.high_priority_gaps.len()
    );

    let mut out = String::new();
    line(&mut out, format!("  {}", border(&format!("┌{}┐", rule))));
    line(
        &mut out,
        format!(
            "  {}{}{}",
            border("│"),
            palette.paint(&title, Style::Heading),
            border("│")
        ),
    );
    line(&mut out, format!("  {}", border(&format!("├{}┤", rule))));
    line(
        &mut out,
        row(
            "CUI Present in Environment:  ",
            yes_no(result.cui_in_scope),
            flag_style(result.cui_in_scope),
        ),
    );
    line(
        &mut out,
        row(
            "FCI Present in Environment:  ",
            yes_no(result.fci_in_scope),
            flag_style(result.fci_in_scope),
        ),
    );
    line(
        &mut out,
        row(
            "Systems In Scope:            ",
            &result.systems_in_scope.label,
            Style::Bold,
        ),
    );
    line(
        &mut out,
        row(
            "CMMC Level Required:         ",
            &result.cmmc_level_required.to_string(),
            level_style,
        ),
    );
    line(
        &mut out,
        row(
            "Enclave Recommended:         ",
            yes_no(result.enclave_recommended),
            enclave_style,
        ),
    );
    line(
        &mut out,
        row("Compliance Gaps:             ", &gaps, Style::Bold),
    );
    line(&mut out, format!("  {}", border(&format!("└{}┘", rule))));
    out
}

fn meta_line(out: &mut String, label: &str, value: Option<&str>) {
    let value = value.filter(|v| !v.trim().is_empty()).unwrap_or("—");
    line(out, format!("| {} | {} |", label, value));
}

fn render_metadata(out: &mut String, meta: &Metadata) {
    line(out, "| Field | Value |");
    line(out, "|---|---|");
    meta_line(out, "Organization", meta.organization.as_deref());
    meta_line(out, "CAGE Code", meta.cage_code.as_deref());
    meta_line(out, "Assessor", meta.assessor.as_deref());
    meta_line(out, "Primary Contract", meta.contract_ref.as_deref());
    meta_line(out, "Assessment Started", Some(&meta.assessment_date));
    meta_line(out, "Completed", meta.completed_at.as_deref());
    meta_line(out, "Tool Version", Some(&meta.tool_version));
}

fn render_gaps(out: &mut String, gaps: &[Gap]) {
    if gaps.is_empty() {
        line(out, "No compliance gaps were identified from the answers given.\n");
        return;
    }
    let mut sorted: Vec<&Gap> = gaps.iter().collect();
    // stable: rule order is kept within a priority
    sorted.sort_by_key(|g| g.priority);
    for (i, gap) in sorted.iter().enumerate() {
        line(out, format!("### {}. [{}] {}\n", i + 1, gap.priority, gap.title));
        line(out, format!("- **NIST Control:** {}", gap.nist_control));
        line(out, format!("- **Detail:** {}\n", gap.detail));
    }
}

/// Wording follows whichever boundary answer made the reduction possible.
/// A reduced system count is quoted only when separation was described.
fn scope_reduction_text(responses: &ResponseStore, result: &DerivedResult) -> String {
    let reason = if responses.is_true(CAN_SEPARATE) {
        "Not every system is used for DoD work and the CUI systems can be separated from the rest"
    } else {
        "Not every system is used for DoD work and the organization is willing to isolate CUI \
         systems from the rest"
    };
    let outcome = if result.systems_in_scope.is_estimate() {
        format!(
            "so the assessment could cover about {} systems instead of the whole environment",
            result.systems_in_scope.count
        )
    } else {
        "so the assessment could cover fewer systems once that separation is designed".to_string()
    };
    format!("- **Narrow the assessment boundary.** {}, {}.", reason, outcome)
}

fn render_recommendations(out: &mut String, responses: &ResponseStore, result: &DerivedResult) {
    let mut any = false;
    if result.enclave_recommended {
        any = true;
        line(
            out,
            "- **Deploy a CUI enclave.** Processing CUI inside a dedicated, isolated \
             environment keeps everything outside it out of the assessment boundary.",
        );
    }
    if result.scope_reduction_possible {
        any = true;
        line(out, scope_reduction_text(responses, result));
    }
    if !result.high_priority_gaps.is_empty() {
        any = true;
        line(
            out,
            format!(
                "- **Close the {} HIGH priority gap(s) first.** They are the most likely \
                 findings in a CMMC assessment.",
                result.high_priority_gaps.len()
            ),
        );
    }
    if result.cmmc_level_required == CmmcLevel::NotRequired {
        any = true;
        line(
            out,
            "- **Confirm contract requirements.** No CUI or FCI was identified; verify \
             that no current or pending contract carries CMMC clauses.",
        );
    }
    if !any {
        line(out, "- No additional recommendations.");
    }
    line(out, "");
}

pub fn render_markdown(catalog: &Catalog, checkpoint: &Checkpoint, result: &DerivedResult) -> String {
    let mut out = String::new();
    let org = checkpoint
        .metadata
        .organization
        .as_deref()
        .filter(|o| !o.trim().is_empty())
        .unwrap_or("Unnamed Organization");

    line(&mut out, format!("# CMMC Scoping Assessment — {}\n", org));
    if !checkpoint.is_complete() {
        line(
            &mut out,
            format!(
                "> **Draft:** this assessment is not finished. Results reflect the {} answer(s) \
                 recorded so far.\n",
                checkpoint.responses.len()
            ),
        );
    }
    render_metadata(&mut out, &checkpoint.metadata);
    line(&mut out, "");

    line(&mut out, "## Scope Summary\n");
    line(&mut out, "| Item | Result |");
    line(&mut out, "|---|---|");
    line(&mut out, format!("| CUI in scope | {} |", yes_no(result.cui_in_scope)));
    line(&mut out, format!("| FCI in scope | {} |", yes_no(result.fci_in_scope)));
    line(
        &mut out,
        format!("| CMMC level required | {} |", result.cmmc_level_required),
    );
    line(
        &mut out,
        format!("| Systems in scope | {} |", result.systems_in_scope.label),
    );
    line(
        &mut out,
        format!(
            "| Enclave recommended | {} |",
            yes_no(result.enclave_recommended)
        ),
    );
    line(
        &mut out,
        format!(
            "| Scope reduction possible | {} |",
            yes_no(result.scope_reduction_possible)
        ),
    );
    line(
        &mut out,
        format!(
            "| Compliance gaps | {} ({} HIGH) |\n",
            result.gap_count,
            result.high_priority_gaps.len()
        ),
    );

    line(&mut out, "## Compliance Gaps\n");
    render_gaps(&mut out, &result.compliance_gaps);

    if !result.nist_control_gaps.is_empty() {
        line(&mut out, "## NIST SP 800-171 Controls With Gaps\n");
        for c in &result.nist_control_gaps {
            line(&mut out, format!("- {}", c));
        }
        line(&mut out, "");
    }

    line(&mut out, "## Recommendations\n");
    render_recommendations(&mut out, &checkpoint.responses, result);

    line(&mut out, "## Responses\n");
    for group in catalog.groups() {
        let answered: Vec<_> = group
            .questions
            .iter()
            .filter_map(|q| checkpoint.responses.get(q.id).map(|a| (q, a)))
            .collect();
        if answered.is_empty() {
            continue;
        }
        line(&mut out, format!("### {}\n", group.title));
        for (q, answer) in answered {
            let marker = if q.is_critical() { " **[CRITICAL]**" } else { "" };
            let text = q.text.split_whitespace().collect::<Vec<_>>().join(" ");
            line(&mut out, format!("- **{}**{} {}", q.id, marker, text));
            line(&mut out, format!("  - Answer: {}", answer));
        }
        line(&mut out, "");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ids::*;
    use crate::domain::models::Answer;
    use crate::services::scoring::score;

    fn sample() -> (Catalog, Checkpoint, DerivedResult) {
        let catalog = Catalog::standard();
        let mut cp = Checkpoint::start();
        cp.metadata.organization = Some("Acme Machining".into());
        cp.metadata.assessor = Some("J. Doe".into());
        cp.responses.insert(HANDLES_GOV_INFO, Answer::Flag(true));
        cp.responses.insert(CONTRACT_CLAUSE, Answer::Flag(true));
        cp.responses.insert(PERSONAL_DEVICES, Answer::Flag(true));
        cp.responses.insert(
            MFA,
            Answer::Text("No — password-only authentication is used".into()),
        );
        let result = score(&cp.responses);
        cp.score = Some(result.clone());
        (catalog, cp, result)
    }

    #[test]
    fn markdown_lists_gaps_high_first() {
        let (catalog, cp, result) = sample();
        let md = render_markdown(&catalog, &cp, &result);
        assert!(md.starts_with("# CMMC Scoping Assessment — Acme Machining"));
        assert!(!md.contains("Draft"));
        let high = md.find("[HIGH] Multi-Factor").expect("mfa gap");
        let medium = md.find("[MEDIUM] Personal Devices").expect("byod gap");
        assert!(high < medium);
        assert!(md.contains("| CMMC level required | Level 2 |"));
        assert!(md.contains("- IA.3.083"));
    }

    #[test]
    fn markdown_groups_answers_in_catalog_order() {
        let (catalog, cp, result) = sample();
        let md = render_markdown(&catalog, &cp, &result);
        let inventory = md.find("### Module 1").expect("inventory group");
        let flow = md.find("### Module 2").expect("data flow group");
        let access = md.find("### Module 4").expect("access group");
        assert!(inventory < flow && flow < access);
        assert!(!md.contains("### Module 3"));
        assert!(md.contains("- **df_01** **[CRITICAL]**"));
    }

    #[test]
    fn unfinished_checkpoint_is_marked_draft() {
        let (catalog, mut cp, result) = sample();
        cp.score = None;
        assert!(render_markdown(&catalog, &cp, &result).contains("**Draft:**"));
    }

    fn boundary_markdown(answers: Vec<(&'static str, Answer)>) -> String {
        let catalog = Catalog::standard();
        let mut cp = Checkpoint::start();
        cp.responses.insert(DEVICE_COUNT, Answer::Text("51–200".into()));
        for (id, answer) in answers {
            cp.responses.insert(id, answer);
        }
        let result = score(&cp.responses);
        render_markdown(&catalog, &cp, &result)
    }

    #[test]
    fn reduction_quotes_enclave_estimate_when_separable() {
        let md = boundary_markdown(vec![
            (WHOLE_ENVIRONMENT, Answer::Flag(false)),
            (CAN_SEPARATE, Answer::Flag(true)),
            (
                SEPARATION,
                Answer::Text("Yes — logically separated (separate VLAN / network segment)".into()),
            ),
        ]);
        assert!(md.contains("the CUI systems can be separated from the rest"));
        assert!(md.contains("could cover about 40 systems instead of the whole environment"));
        assert!(!md.contains("only) systems"));
    }

    #[test]
    fn reduction_from_willingness_does_not_claim_separation() {
        let md = boundary_markdown(vec![
            (WHOLE_ENVIRONMENT, Answer::Flag(false)),
            (CAN_SEPARATE, Answer::Flag(false)),
            (HAS_ENCLAVE, Answer::Flag(false)),
            (WILLING_TO_ISOLATE, Answer::Flag(true)),
        ]);
        assert!(md.contains("| Scope reduction possible | YES |"));
        assert!(md.contains("willing to isolate CUI systems"));
        assert!(!md.contains("can be separated"));
        assert!(!md.contains("200 systems"));
        assert!(md.contains("once that separation is designed"));
    }

    #[test]
    fn no_reduction_when_every_system_is_in_scope() {
        let md = boundary_markdown(vec![
            (WHOLE_ENVIRONMENT, Answer::Flag(true)),
            (WILLING_TO_ISOLATE, Answer::Flag(true)),
        ]);
        assert!(md.contains("| Scope reduction possible | NO |"));
        assert!(!md.contains("Narrow the assessment boundary"));
    }

    #[test]
    fn summary_box_is_aligned_without_color() {
        let (_, _, result) = sample();
        let text = render_summary(&Palette::plain(), &result);
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(text.contains("CMMC Level Required:         Level 2"));
    }

    #[test]
    fn summary_box_colors_values() {
        let (_, _, result) = sample();
        let text = render_summary(&Palette::new(true), &result);
        assert!(text.contains("\x1b[91mYES\x1b[0m"));
    }
}
