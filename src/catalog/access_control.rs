use super::ids::*;
use crate::domain::models::{Question, Tag};

const GAP: &[Tag] = &[Tag::GapFlag];
const CRITICAL_GAP: &[Tag] = &[Tag::Critical, Tag::GapFlag];

pub static QUESTIONS: &[Question] = &[
    Question::yes_no(
        "ac_01",
        "Does your organization maintain a formal list of authorized users for CUI systems?",
    )
    .help(
        "NIST AC.1.001 requires that access to CUI systems be limited to\n\
         authorized users with a documented need to access that information.",
    )
    .controls(&["AC.1.001"])
    .tags(GAP),
    Question::choice(
        MFA,
        "Is Multi-Factor Authentication (MFA) enforced for all accounts that can access CUI?",
        &[
            "Yes — MFA enforced for all users (local and remote)",
            "Yes — MFA enforced for remote access only",
            "Yes — MFA enforced for privileged/admin accounts only",
            "No — password-only authentication is used",
            "Partially implemented",
        ],
    )
    .help(
        "NIST IA.3.083 requires MFA for local and network access to CUI systems.\n\
         This is one of the most commonly failed CMMC controls for SMBs.",
    )
    .controls(&["IA.3.083"])
    .tags(CRITICAL_GAP),
    Question::yes_no(
        PRIVILEGED_SEPARATION,
        "Are privileged accounts (admins) separated from standard user accounts?",
    )
    .help(
        "Admins should use a dedicated admin account for privileged tasks \
         and a separate standard account for day-to-day work.",
    )
    .controls(&["AC.1.002"])
    .tags(GAP),
    Question::choice(
        "ac_04",
        "Does your organization enforce a password complexity and length policy?",
        &[
            "Yes — meets NIST 800-63B requirements (min 8 chars, complexity)",
            "Yes — but below NIST recommendations",
            "No formal policy — users choose their own passwords",
            "Not sure",
        ],
    )
    .controls(&["IA.3.083"])
    .tags(GAP),
    Question::choice(
        REMOTE_ACCESS,
        "Is remote access to CUI systems (VPN, RDP, SSH) controlled and logged?",
        &[
            "Yes — VPN with MFA + full logging",
            "Yes — VPN but no MFA",
            "Yes — direct RDP/SSH (no VPN)",
            "No formal remote access controls",
            "No remote access allowed",
        ],
    )
    .controls(&["AC.1.001", "IA.3.085"])
    .tags(CRITICAL_GAP),
    Question::choice(
        "ac_06",
        "Are user accounts reviewed and de-provisioned promptly when employees leave or change roles?",
        &[
            "Yes — formal offboarding process with immediate account termination",
            "Yes — accounts removed within 1–7 days",
            "No formal process — accounts may remain active",
            "Not sure",
        ],
    )
    .controls(&["AC.1.001"])
    .tags(GAP),
    Question::choice(
        AUDIT_LOGGING,
        "Are user activities on CUI systems logged and monitored?",
        &[
            "Yes — comprehensive logging with alerting (SIEM)",
            "Yes — basic logging (event logs, auditd)",
            "Partial — some systems are logged",
            "No logging in place",
        ],
    )
    .help(
        "CMMC Level 2 requires audit logging (AU controls). \
         Logs must be protected from unauthorized access or modification.",
    )
    .controls(&["AU.2.041", "AU.2.042"])
    .tags(GAP),
    Question::choice(
        REMOVABLE_MEDIA,
        "Is the use of removable media (USB drives, external hard drives) controlled on CUI systems?",
        &[
            "Yes — USB ports are disabled or blocked by policy + technical control",
            "Yes — policy exists but not technically enforced",
            "No — unrestricted USB usage",
            "Not sure",
        ],
    )
    .controls(&["AC.2.006", "MP.2.119"])
    .tags(GAP),
    Question::choice(
        AWARENESS_TRAINING,
        "Do personnel with access to CUI receive regular cybersecurity awareness training?",
        &[
            "Yes — annual formal training with documentation",
            "Yes — informal training (ad hoc)",
            "No formal training program",
        ],
    )
    .help("NIST AT.2.056 requires security awareness training for all users.")
    .controls(&["AT.2.056"])
    .tags(GAP),
    Question::yes_no(
        "ac_10",
        "Does your organization have a written acceptable use policy (AUP) for CUI systems?",
    )
    .controls(&["AC.2.005"])
    .tags(GAP),
];
