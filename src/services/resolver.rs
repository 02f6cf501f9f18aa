use crate::catalog::Catalog;
use crate::domain::models::{Answer, Question, QuestionGroup, ResponseStore};
use serde::Serialize;
use tracing::debug;

#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error("input closed before the assessment finished")]
    Aborted,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("collector returned a nonconforming answer for {question}: {reason}")]
    NonconformingAnswer { question: String, reason: String },
}

/// Source of answers for presented questions.
///
/// `collect` blocks until it has a value that fits the question's kind;
/// retrying on bad input is the collector's business.
pub trait AnswerCollector {
    /// Called once before the first question presented from `group`.
    fn begin_group(&mut self, _group: &QuestionGroup) -> Result<(), CollectError> {
        Ok(())
    }

    /// Called for a group passed without asking anything because every
    /// reachable question in it was answered before this run.
    fn group_completed(&mut self, _group: &QuestionGroup) -> Result<(), CollectError> {
        Ok(())
    }

    /// `number` counts presented questions only.
    fn collect(&mut self, question: &Question, number: usize) -> Result<Answer, CollectError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveSummary {
    pub presented: Vec<String>,
    pub already_answered: Vec<String>,
    pub skipped: Vec<String>,
}

/// Whether `question` is reachable given the answers recorded so far.
///
/// A question without a dependency is always reachable. Otherwise the
/// dependency must already be answered and match the expectation; a
/// missing or differently-typed answer means "skip".
pub fn should_present(question: &Question, store: &ResponseStore) -> bool {
    match question.depends_on {
        None => true,
        Some(dep) => store
            .get(dep.question)
            .map(|answer| dep.expect.matches(answer))
            .unwrap_or(false),
    }
}

/// Walk the catalog once, in order, asking every reachable question that has
/// no recorded answer yet.
///
/// Each answer is written to `store` before the next question's dependency is
/// evaluated, and `on_answer` runs after every write so the caller can
/// checkpoint. Nothing is revisited.
pub fn run<C, F>(
    catalog: &Catalog,
    store: &mut ResponseStore,
    collector: &mut C,
    mut on_answer: F,
) -> anyhow::Result<ResolveSummary>
where
    C: AnswerCollector,
    F: FnMut(&ResponseStore) -> anyhow::Result<()>,
{
    let mut summary = ResolveSummary::default();
    let mut number = 0usize;

    for group in catalog.groups() {
        let mut group_started = false;
        let mut resumed_in_group = false;
        for question in &group.questions {
            if store.contains(question.id) {
                debug!(question = question.id, "already answered");
                resumed_in_group = true;
                summary.already_answered.push(question.id.to_string());
                continue;
            }
            if !should_present(question, store) {
                debug!(question = question.id, "dependency not met, skipping");
                summary.skipped.push(question.id.to_string());
                continue;
            }

            if !group_started {
                collector.begin_group(group)?;
                group_started = true;
            }
            number += 1;
            let answer = collector.collect(question, number)?;
            question
                .check_answer(&answer)
                .map_err(|reason| ResolveError::NonconformingAnswer {
                    question: question.id.to_string(),
                    reason,
                })?;

            debug!(question = question.id, number, "answered");
            store.insert(question.id, answer);
            summary.presented.push(question.id.to_string());
            on_answer(store)?;
        }
        if !group_started {
            debug!(group = group.key, "nothing left to ask in group");
            if resumed_in_group {
                collector.group_completed(group)?;
            }
        }
    }

    Ok(summary)
}
