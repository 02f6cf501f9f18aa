use crate::cli::ColorMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CHECKPOINT_FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    CHECKPOINT_FORMAT_VERSION
}

fn no_choices(choices: &&'static [&'static str]) -> bool {
    choices.is_empty()
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

// ── Questions ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    YesNo,
    Choice,
    MultiChoice,
    Text,
    Number,
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnswerKind::YesNo => "yes_no",
            AnswerKind::Choice => "choice",
            AnswerKind::MultiChoice => "multi_choice",
            AnswerKind::Text => "text",
            AnswerKind::Number => "number",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Highlighted when presented and in the report.
    Critical,
    /// A weak answer to this question may surface as a gap.
    GapFlag,
}

/// What a dependency expects of the earlier answer.
///
/// `Flag` only matches a recorded yes/no answer; any other answer type
/// compares unequal and the dependent question is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum Expect {
    Flag(bool),
    Choice(&'static str),
    Selection(&'static [&'static str]),
    Number(i64),
}

impl Expect {
    pub fn matches(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (Expect::Flag(want), Answer::Flag(got)) => want == got,
            (Expect::Choice(want), Answer::Text(got)) => want == got,
            (Expect::Number(want), Answer::Number(got)) => want == got,
            (Expect::Selection(want), Answer::Selection(got)) => {
                let mut want: Vec<&str> = want.to_vec();
                let mut got: Vec<&str> = got.iter().map(String::as_str).collect();
                want.sort_unstable();
                want.dedup();
                got.sort_unstable();
                got.dedup();
                want == got
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub question: &'static str,
    pub expect: Expect,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub kind: AnswerKind,
    #[serde(skip_serializing_if = "no_choices")]
    pub choices: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
    pub controls: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Dependency>,
    pub tags: &'static [Tag],
}

impl Question {
    const fn new(id: &'static str, text: &'static str, kind: AnswerKind) -> Self {
        Self {
            id,
            text,
            kind,
            choices: &[],
            help: None,
            controls: &[],
            depends_on: None,
            tags: &[],
        }
    }

    pub const fn yes_no(id: &'static str, text: &'static str) -> Self {
        Self::new(id, text, AnswerKind::YesNo)
    }

    pub const fn choice(
        id: &'static str,
        text: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        let mut q = Self::new(id, text, AnswerKind::Choice);
        q.choices = choices;
        q
    }

    pub const fn multi(
        id: &'static str,
        text: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        let mut q = Self::new(id, text, AnswerKind::MultiChoice);
        q.choices = choices;
        q
    }

    pub const fn text(id: &'static str, text: &'static str) -> Self {
        Self::new(id, text, AnswerKind::Text)
    }

    pub const fn number(id: &'static str, text: &'static str) -> Self {
        Self::new(id, text, AnswerKind::Number)
    }

    pub const fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub const fn controls(mut self, controls: &'static [&'static str]) -> Self {
        self.controls = controls;
        self
    }

    pub const fn tags(mut self, tags: &'static [Tag]) -> Self {
        self.tags = tags;
        self
    }

    pub const fn depends_on(mut self, question: &'static str, expect: Expect) -> Self {
        self.depends_on = Some(Dependency { question, expect });
        self
    }

    pub fn is_critical(&self) -> bool {
        self.tags.contains(&Tag::Critical)
    }

    /// Check that `answer` has the shape this question's kind requires.
    pub fn check_answer(&self, answer: &Answer) -> Result<(), String> {
        match (self.kind, answer) {
            (AnswerKind::YesNo, Answer::Flag(_)) => Ok(()),
            (AnswerKind::Number, Answer::Number(_)) => Ok(()),
            (AnswerKind::Text, Answer::Text(_)) => Ok(()),
            (AnswerKind::Choice, Answer::Text(s)) => {
                if self.choices.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not one of the choices", s))
                }
            }
            (AnswerKind::MultiChoice, Answer::Selection(items)) => {
                if items.is_empty() {
                    return Err("selection is empty".to_string());
                }
                match items.iter().find(|s| !self.choices.contains(&s.as_str())) {
                    Some(bad) => Err(format!("'{}' is not one of the choices", bad)),
                    None => Ok(()),
                }
            }
            (kind, other) => Err(format!("expected {} answer, got {}", kind, other.kind_name())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionGroup {
    pub key: &'static str,
    pub title: &'static str,
    pub intro: &'static str,
    pub questions: Vec<Question>,
}

// ── Answers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Flag(bool),
    Number(i64),
    /// Single choice label or free text.
    Text(String),
    Selection(Vec<String>),
}

impl Answer {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Answer::Flag(_) => "yes/no",
            Answer::Number(_) => "number",
            Answer::Text(_) => "text",
            Answer::Selection(_) => "selection",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Flag(true) => f.write_str("Yes"),
            Answer::Flag(false) => f.write_str("No"),
            Answer::Number(n) => write!(f, "{}", n),
            Answer::Text(s) if s.is_empty() => f.write_str("(no answer)"),
            Answer::Text(s) => f.write_str(s),
            Answer::Selection(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Flat id → answer mapping for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseStore {
    answers: BTreeMap<String, Answer>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, answer: Answer) {
        self.answers.insert(id.into(), answer);
    }

    pub fn get(&self, id: &str) -> Option<&Answer> {
        self.answers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.answers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn flag(&self, id: &str) -> Option<bool> {
        match self.get(id) {
            Some(Answer::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn is_true(&self, id: &str) -> bool {
        self.flag(id) == Some(true)
    }

    pub fn is_false(&self, id: &str) -> bool {
        self.flag(id) == Some(false)
    }

    /// Choice or free-text answer; any other type reads as absent.
    pub fn text(&self, id: &str) -> Option<&str> {
        match self.get(id) {
            Some(Answer::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn selection(&self, id: &str) -> Option<&[String]> {
        match self.get(id) {
            Some(Answer::Selection(items)) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl FromIterator<(String, Answer)> for ResponseStore {
    fn from_iter<I: IntoIterator<Item = (String, Answer)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

// ── Scoring output ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub rule: String,
    /// One or more control identifiers separated by `/`.
    pub nist_control: String,
    pub title: String,
    pub detail: String,
    pub priority: Priority,
}

impl Gap {
    pub fn control_ids(&self) -> impl Iterator<Item = &str> {
        self.nist_control
            .split('/')
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmmcLevel {
    #[serde(rename = "Level 2")]
    Level2,
    #[serde(rename = "Level 1")]
    Level1,
    #[serde(rename = "Not Required (verify contract requirements)")]
    NotRequired,
}

impl fmt::Display for CmmcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmmcLevel::Level2 => "Level 2",
            CmmcLevel::Level1 => "Level 1",
            CmmcLevel::NotRequired => "Not Required (verify contract requirements)",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateBasis {
    FullEnvironment,
    EnclaveOnly,
    PartialSeparation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEstimate {
    pub count: u32,
    pub basis: EstimateBasis,
    pub label: String,
}

impl SystemEstimate {
    pub fn new(count: u32, basis: EstimateBasis) -> Self {
        let label = match basis {
            EstimateBasis::FullEnvironment => count.to_string(),
            EstimateBasis::EnclaveOnly => format!("~{} (estimated enclave systems only)", count),
            EstimateBasis::PartialSeparation => format!("~{} (estimated)", count),
        };
        Self {
            count,
            basis,
            label,
        }
    }

    pub fn is_estimate(&self) -> bool {
        self.basis != EstimateBasis::FullEnvironment
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedResult {
    pub cui_in_scope: bool,
    pub fci_in_scope: bool,
    pub cmmc_level_required: CmmcLevel,
    pub enclave_recommended: bool,
    pub systems_in_scope: SystemEstimate,
    pub compliance_gaps: Vec<Gap>,
    pub gap_count: usize,
    pub high_priority_gaps: Vec<Gap>,
    pub nist_control_gaps: Vec<String>,
    pub scope_reduction_possible: bool,
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub tool_version: String,
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    pub assessment_date: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub cage_code: Option<String>,
    #[serde(default)]
    pub assessor: Option<String>,
    #[serde(default)]
    pub contract_ref: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Metadata {
    pub fn started_now() -> Self {
        Self {
            tool_version: TOOL_VERSION.to_string(),
            format_version: CHECKPOINT_FORMAT_VERSION,
            assessment_date: chrono::Local::now().to_rfc3339(),
            organization: None,
            cage_code: None,
            assessor: None,
            contract_ref: None,
            completed_at: None,
        }
    }

    pub fn has_organization(&self) -> bool {
        self.organization
            .as_deref()
            .map(|o| !o.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub metadata: Metadata,
    pub responses: ResponseStore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<DerivedResult>,
}

impl Checkpoint {
    pub fn start() -> Self {
        Self {
            metadata: Metadata::started_now(),
            responses: ResponseStore::new(),
            score: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.score.is_some()
    }
}

// ── Command reports ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AssessReport {
    pub output: String,
    pub report: String,
    pub presented: usize,
    pub already_answered: usize,
    pub skipped: usize,
    pub score: DerivedResult,
}

#[derive(Serialize)]
pub struct ReportWritten {
    pub report: String,
    pub complete: bool,
    pub answered: usize,
}

#[derive(Serialize)]
pub struct QuestionRow {
    pub group: &'static str,
    #[serde(flatten)]
    pub question: Question,
}

#[derive(Serialize)]
pub struct CatalogSummary {
    pub groups: usize,
    pub questions: usize,
    pub rules: usize,
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn default_reports_dir() -> String {
    "reports".to_string()
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: ConfigGeneral,
}

#[derive(Debug, Deserialize)]
pub struct ConfigGeneral {
    /// Where new assessments land; relative paths resolve against the cwd.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
    #[serde(default)]
    pub color: Option<ColorMode>,
}

impl Default for ConfigGeneral {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            color: None,
        }
    }
}
