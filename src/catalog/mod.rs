//! Static question catalog.
//!
//! ## Files
//! - `system_inventory.rs` — devices, cloud, BYOD, third parties.
//! - `data_flow.rs` — whether CUI/FCI is present and how it moves.
//! - `boundary.rs` — assessment boundary, separation, enclave.
//! - `access_control.rs` — authentication, logging, media, training.
//!
//! Groups are concatenated in the order above into the single sequence the
//! resolver walks. Ids are unique across the whole catalog, and a dependency
//! always points at a question that comes earlier in that sequence.

pub mod access_control;
pub mod boundary;
pub mod data_flow;
pub mod system_inventory;

use crate::domain::models::{AnswerKind, Expect, Question, QuestionGroup};
use std::collections::HashMap;

/// Question ids the scoring rules read.
pub mod ids {
    pub const DEVICE_COUNT: &str = "si_01";
    pub const PERSONAL_DEVICES: &str = "si_04";

    pub const HANDLES_GOV_INFO: &str = "df_01";
    pub const CONTRACT_CLAUSE: &str = "df_02";
    pub const CUI_CATEGORY: &str = "df_03";
    pub const ENCRYPTION_AT_REST: &str = "df_06";
    pub const ENCRYPTION_IN_TRANSIT: &str = "df_07";
    pub const SHARES_WITH_SUBS: &str = "df_08";
    pub const SUB_CERTIFICATION: &str = "df_08a";
    pub const FCI_ONLY: &str = "df_09";

    pub const WHOLE_ENVIRONMENT: &str = "bd_01";
    pub const CAN_SEPARATE: &str = "bd_01a";
    pub const SEPARATION: &str = "bd_02";
    pub const HAS_ENCLAVE: &str = "bd_03";
    pub const WILLING_TO_ISOLATE: &str = "bd_04";
    pub const SHARED_SERVICES: &str = "bd_06";
    pub const SHARED_SERVICE_LIST: &str = "bd_06a";
    pub const HAS_SSP: &str = "bd_07";
    pub const SPRS_SUBMITTED: &str = "bd_08";

    pub const MFA: &str = "ac_02";
    pub const PRIVILEGED_SEPARATION: &str = "ac_03";
    pub const REMOTE_ACCESS: &str = "ac_05";
    pub const AUDIT_LOGGING: &str = "ac_07";
    pub const REMOVABLE_MEDIA: &str = "ac_08";
    pub const AWARENESS_TRAINING: &str = "ac_09";
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),
    #[error("question {question} depends on unknown question {dependency}")]
    UnknownDependency { question: String, dependency: String },
    #[error("question {question} depends on {dependency}, which is not asked before it")]
    ForwardDependency { question: String, dependency: String },
    #[error("question {question} expects {expect} from {dependency}, which is a {kind} question")]
    DependencyKindMismatch {
        question: String,
        dependency: String,
        expect: String,
        kind: AnswerKind,
    },
    #[error("choice question {0} needs at least two choices")]
    MissingChoices(String),
    #[error("rule text '{needle}' no longer appears in any choice of {question}")]
    StaleRuleWording { question: String, needle: String },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    groups: Vec<QuestionGroup>,
}

impl Catalog {
    pub fn new(groups: Vec<QuestionGroup>) -> Self {
        Self { groups }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            QuestionGroup {
                key: "system_inventory",
                title: "Module 1: System & Asset Inventory",
                intro: "This module helps identify all systems and assets that may fall\n\
                        within your CMMC assessment boundary.",
                questions: system_inventory::QUESTIONS.to_vec(),
            },
            QuestionGroup {
                key: "data_flow",
                title: "Module 2: CUI/FCI Data Flow Analysis",
                intro: "This module traces how CUI and FCI flows through your environment.\n\
                        It is the most important section for determining your CMMC scope.\n\
                        \n\
                        CUI = Controlled Unclassified Information (triggers CMMC Level 2)\n\
                        FCI = Federal Contract Information (triggers CMMC Level 1 minimum)",
                questions: data_flow::QUESTIONS.to_vec(),
            },
            QuestionGroup {
                key: "boundary",
                title: "Module 3: System Boundary Definition",
                intro: "This module defines the boundary of your CMMC assessment scope.\n\
                        A well-defined boundary limits which systems require CMMC controls,\n\
                        reducing the cost and complexity of compliance.",
                questions: boundary::QUESTIONS.to_vec(),
            },
            QuestionGroup {
                key: "access_control",
                title: "Module 4: Access Control & Authentication",
                intro: "This module evaluates your access control and authentication\n\
                        posture — one of the most frequently assessed CMMC domains.",
                questions: access_control::QUESTIONS.to_vec(),
            },
        ])
    }

    pub fn groups(&self) -> &[QuestionGroup] {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&QuestionGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// All questions in presentation order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.groups.iter().flat_map(|g| g.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Check the ordering and typing invariants the resolver relies on.
///
/// `anchors` are `(question id, substring)` pairs a scoring rule matches on;
/// each substring must still occur in one of that question's choices.
pub fn validate(catalog: &Catalog, anchors: &[(&str, &str)]) -> Result<(), CatalogError> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    for (idx, q) in catalog.questions().enumerate() {
        if position.insert(q.id, idx).is_some() {
            return Err(CatalogError::DuplicateQuestion(q.id.to_string()));
        }
    }

    for (idx, q) in catalog.questions().enumerate() {
        if matches!(q.kind, AnswerKind::Choice | AnswerKind::MultiChoice) && q.choices.len() < 2 {
            return Err(CatalogError::MissingChoices(q.id.to_string()));
        }
        let Some(dep) = q.depends_on else {
            continue;
        };
        let Some(&dep_idx) = position.get(dep.question) else {
            return Err(CatalogError::UnknownDependency {
                question: q.id.to_string(),
                dependency: dep.question.to_string(),
            });
        };
        if dep_idx >= idx {
            return Err(CatalogError::ForwardDependency {
                question: q.id.to_string(),
                dependency: dep.question.to_string(),
            });
        }
        let target = catalog
            .question(dep.question)
            .ok_or_else(|| CatalogError::UnknownDependency {
                question: q.id.to_string(),
                dependency: dep.question.to_string(),
            })?;
        if !expectation_fits(&dep.expect, target) {
            return Err(CatalogError::DependencyKindMismatch {
                question: q.id.to_string(),
                dependency: dep.question.to_string(),
                expect: format!("{:?}", dep.expect),
                kind: target.kind,
            });
        }
    }

    for (qid, needle) in anchors {
        let present = catalog
            .question(qid)
            .map(|q| q.choices.iter().any(|c| c.contains(needle)))
            .unwrap_or(false);
        if !present {
            return Err(CatalogError::StaleRuleWording {
                question: qid.to_string(),
                needle: needle.to_string(),
            });
        }
    }

    Ok(())
}

fn expectation_fits(expect: &Expect, target: &Question) -> bool {
    match (expect, target.kind) {
        (Expect::Flag(_), AnswerKind::YesNo) => true,
        (Expect::Number(_), AnswerKind::Number) => true,
        (Expect::Choice(c), AnswerKind::Choice) => target.choices.contains(c),
        (Expect::Selection(items), AnswerKind::MultiChoice) => {
            !items.is_empty() && items.iter().all(|c| target.choices.contains(c))
        }
        _ => false,
    }
}
