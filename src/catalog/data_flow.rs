//! CUI/FCI data flow questions. These decide whether CUI or FCI is present
//! at all, so most of them hang off the government-information root question.

use super::ids::*;
use crate::domain::models::{Expect, Question, Tag};

/// Sentinel category; a selection made up only of this does not confirm CUI.
pub const CUI_CATEGORY_UNSURE: &str = "I am not sure — need help identifying";

pub const CUI_CATEGORIES: &[&str] = &[
    "Acquisition & Procurement (e.g., contract data, bid information)",
    "Defense & Military (e.g., technical specs, weapons system data)",
    "Export Controlled (ITAR / EAR controlled technical data)",
    "Financial (e.g., cost/pricing data, budget information)",
    "Intelligence (e.g., threat assessments, SIGINT products)",
    "Law Enforcement Sensitive",
    "Privacy / Personally Identifiable Information (PII)",
    "Proprietary Business Information",
    "Research & Development (pre-decisional R&D data)",
    "Other CUI (specify in report)",
    CUI_CATEGORY_UNSURE,
];

const IF_GOV: Expect = Expect::Flag(true);

pub static QUESTIONS: &[Question] = &[
    Question::yes_no(
        HANDLES_GOV_INFO,
        "Does your organization receive, create, process, store, or transmit\n\
         any information on behalf of the U.S. federal government?",
    )
    .help(
        "Answer YES if you perform work under any federal contract, \
         grant, or cooperative agreement that involves government information.",
    )
    .controls(&["AC.1.001"])
    .tags(&[Tag::Critical]),
    Question::yes_no(
        CONTRACT_CLAUSE,
        "Have you received a DD Form 254 (Contract Security Classification\n\
         Specification) or any contract clause referencing DFARS 252.204-7012\n\
         (Safeguarding Covered Defense Information)?",
    )
    .help(
        "DFARS 252.204-7012 is the primary clause triggering CMMC requirements. \
         A DD Form 254 indicates classified or sensitive work.",
    )
    .controls(&["AC.1.001"])
    .tags(&[Tag::Critical])
    .depends_on(HANDLES_GOV_INFO, IF_GOV),
    Question::multi(
        CUI_CATEGORY,
        "What type(s) of government information does your organization handle? (Select all that apply)",
        CUI_CATEGORIES,
    )
    .help(
        "Select every category that applies. If unsure, select the last option.\n\
         The CUI Registry (archives.gov/cui) has the full category list.",
    )
    .controls(&["MP.2.119"])
    .depends_on(HANDLES_GOV_INFO, IF_GOV),
    Question::multi(
        "df_04",
        "How does CUI/FCI enter your organization? (Select all that apply)",
        &[
            "Email (e.g., attachments from contracting officers)",
            "DoD portals / web applications (e.g., PIEE, EDA, SAFE)",
            "Removable media (USB drives, CDs)",
            "Shared network drives / file shares with the government",
            "Video conferencing (e.g., DoD-provided meeting links with shared docs)",
            "Physical documents / mail",
            "We generate CUI ourselves based on contract work",
            "Not sure",
        ],
    )
    .depends_on(HANDLES_GOV_INFO, IF_GOV)
    .controls(&["AC.2.006", "MP.2.119"]),
    Question::multi(
        "df_05",
        "Where is CUI/FCI stored in your environment? (Select all that apply)",
        &[
            "Employee workstations / laptops (local storage)",
            "On-premises file server / NAS",
            "Microsoft SharePoint / OneDrive for Business",
            "Microsoft Teams (chats, files)",
            "Google Drive",
            "Other cloud storage (Box, Dropbox, etc.)",
            "Email server / cloud email (Exchange, Gmail)",
            "Database (SQL, Oracle, etc.)",
            "Removable media (USB, external drives)",
            "Mobile devices (phones, tablets)",
            "We do not store CUI — process only",
        ],
    )
    .depends_on(HANDLES_GOV_INFO, IF_GOV)
    .controls(&["MP.2.119", "SC.3.177"])
    .tags(&[Tag::Critical]),
    Question::choice(
        ENCRYPTION_AT_REST,
        "Is CUI encrypted at rest (when stored)?",
        &[
            "Yes — all CUI storage locations use encryption",
            "Yes — some storage locations use encryption",
            "No — CUI is stored without encryption",
            "I am not sure",
        ],
    )
    .depends_on(HANDLES_GOV_INFO, IF_GOV)
    .controls(&["SC.3.177"])
    .tags(&[Tag::GapFlag]),
    Question::choice(
        ENCRYPTION_IN_TRANSIT,
        "Is CUI encrypted in transit (when sent over networks or email)?",
        &[
            "Yes — TLS/HTTPS/S/MIME used consistently",
            "Yes — some transmissions are encrypted",
            "No — CUI is sent in plaintext",
            "I am not sure",
        ],
    )
    .depends_on(HANDLES_GOV_INFO, IF_GOV)
    .controls(&["SC.3.177"])
    .tags(&[Tag::GapFlag]),
    Question::yes_no(
        SHARES_WITH_SUBS,
        "Does your organization share or transmit CUI with subcontractors or other third parties?",
    )
    .depends_on(HANDLES_GOV_INFO, IF_GOV)
    .help("This would extend your CMMC boundary to include those subcontractors.")
    .controls(&["AC.2.006"]),
    Question::choice(
        SUB_CERTIFICATION,
        "Do your subcontractors who receive CUI have CMMC certification or documented security controls?",
        &[
            "Yes — CMMC certified",
            "Yes — documented controls (SOC 2, ISO 27001, etc.)",
            "No — no known certification",
            "I am not sure",
        ],
    )
    .depends_on(SHARES_WITH_SUBS, Expect::Flag(true))
    .controls(&["AC.2.006"])
    .tags(&[Tag::GapFlag]),
    Question::yes_no(
        FCI_ONLY,
        "If your organization does NOT handle CUI, do you still handle Federal\n\
         Contract Information (FCI) — information provided by or generated for\n\
         the government under a contract, not intended for public release?",
    )
    .help(
        "FCI requires CMMC Level 1 at minimum. \
         Example: a contractor who only receives Statements of Work (non-CUI) still handles FCI.",
    )
    .controls(&["AC.1.001"]),
];
