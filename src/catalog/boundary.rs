use super::ids::*;
use crate::domain::models::{Expect, Question, Tag};

pub static QUESTIONS: &[Question] = &[
    Question::yes_no(
        WHOLE_ENVIRONMENT,
        "Is your entire IT environment (all systems) used for DoD contract work?",
    )
    .help(
        "If YES, your entire environment is likely in scope.\n\
         If NO, you may be able to define a narrower assessment boundary.",
    )
    .controls(&["SC.3.180"])
    .tags(&[Tag::Critical]),
    Question::yes_no(
        CAN_SEPARATE,
        "Can you clearly identify which specific systems handle CUI/FCI vs. those that do not?",
    )
    .depends_on(WHOLE_ENVIRONMENT, Expect::Flag(false))
    .help(
        "If you can separate systems that touch CUI/FCI from those that don't, \
         you can limit your CMMC scope to only the CUI-handling systems.",
    )
    .controls(&["CM.2.062"]),
    Question::choice(
        SEPARATION,
        "Are CUI-handling systems physically or logically separated from non-CUI systems?",
        &[
            "Yes — physically separate (different hardware, no network connection)",
            "Yes — logically separated (separate VLAN / network segment)",
            "Partially — some separation exists",
            "No — all systems share the same network",
            "Not applicable — entire environment handles CUI",
        ],
    )
    .controls(&["SC.3.180", "SC.3.183"])
    .tags(&[Tag::Critical]),
    Question::yes_no(
        HAS_ENCLAVE,
        "Does your organization use a dedicated, isolated environment (enclave) for CUI processing?",
    )
    .help(
        "An enclave is a dedicated, isolated environment where all CUI is processed.\n\
         Everything outside the enclave is out of CMMC scope.",
    )
    .controls(&["SC.3.180"])
    .tags(&[Tag::Critical]),
    Question::choice(
        "bd_03a",
        "How is your current CUI enclave implemented?",
        &[
            "Dedicated physical machines (air-gapped)",
            "Virtual machines (VMware, Hyper-V, VirtualBox)",
            "Docker / containerized environment",
            "Cloud-hosted enclave (e.g., Microsoft GCC High, AWS GovCloud)",
            "Commercial managed enclave service",
            "Other",
        ],
    )
    .depends_on(HAS_ENCLAVE, Expect::Flag(true))
    .controls(&["SC.3.180"]),
    Question::yes_no(
        WILLING_TO_ISOLATE,
        "Would your organization be willing to implement a dedicated CUI enclave to reduce CMMC scope?",
    )
    .depends_on(HAS_ENCLAVE, Expect::Flag(false))
    .help(
        "An enclave limits which systems need CMMC controls — reducing cost and complexity.\n\
         It can be deployed on existing hardware.",
    )
    .controls(&["SC.3.180"]),
    Question::yes_no(
        "bd_05",
        "Does your network have a defined perimeter with firewall(s) controlling ingress/egress traffic?",
    )
    .controls(&["SC.3.183"])
    .tags(&[Tag::GapFlag]),
    Question::yes_no(
        SHARED_SERVICES,
        "Are there any systems that provide shared services (DNS, DHCP, Active Directory, file sharing) to BOTH CUI and non-CUI systems?",
    )
    .help(
        "Shared services that touch both CUI and non-CUI systems may bring the\n\
         entire shared infrastructure into CMMC scope.",
    )
    .controls(&["SC.3.180", "AC.1.001"])
    .tags(&[Tag::Critical, Tag::GapFlag]),
    Question::multi(
        SHARED_SERVICE_LIST,
        "Which shared services span your CUI and non-CUI environments? (Select all that apply)",
        &[
            "Active Directory / LDAP (identity/authentication)",
            "DNS servers",
            "DHCP servers",
            "File servers / NAS (shared drives)",
            "Email server",
            "Backup / DR systems",
            "Monitoring / SIEM",
            "IT management tools (RMM, patch management)",
            "None — shared services are separated",
        ],
    )
    .depends_on(SHARED_SERVICES, Expect::Flag(true))
    .controls(&["SC.3.180", "AC.1.001"]),
    Question::yes_no(
        HAS_SSP,
        "Does your organization have a written System Security Plan (SSP)?",
    )
    .help(
        "An SSP is required for CMMC Level 2 assessment. It documents your system boundary,\n\
         security controls, and how you meet each NIST 800-171 requirement.",
    )
    .controls(&["CM.2.061"])
    .tags(&[Tag::GapFlag]),
    Question::yes_no(
        SPRS_SUBMITTED,
        "Have you previously completed a NIST SP 800-171 self-assessment (SPRS score submission)?",
    )
    .help(
        "DoD contractors are required to submit a NIST SP 800-171 self-assessment score\n\
         to the Supplier Performance Risk System (SPRS).",
    )
    .controls(&["CM.2.061"])
    .tags(&[Tag::GapFlag]),
    Question::text("bd_08a", "What is your current SPRS score (if known)?")
        .depends_on(SPRS_SUBMITTED, Expect::Flag(true))
        .help("SPRS scores range from -203 (all controls failed) to 110 (all controls met). Enter your score.")
        .controls(&["CM.2.061"]),
];
