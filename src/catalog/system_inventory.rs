use super::ids::*;
use crate::domain::models::{Expect, Question, Tag};

pub const DEVICE_COUNT_BUCKETS: &[&str] = &["1–10", "11–50", "51–200", "201–500", "500+"];

pub static QUESTIONS: &[Question] = &[
    Question::choice(
        DEVICE_COUNT,
        "How many total computing devices (laptops, desktops, servers, VMs) does your organization operate?",
        DEVICE_COUNT_BUCKETS,
    )
    .help("Include all devices that employees use for work, regardless of whether they handle government data.")
    .controls(&["CM.2.062"]),
    Question::yes_no(
        "si_02",
        "Do any of your systems run on cloud infrastructure (AWS, Azure, GCP, etc.)?",
    )
    .help("This includes SaaS tools (Microsoft 365, Google Workspace), IaaS, or PaaS environments.")
    .controls(&["CM.2.061", "SC.3.177"]),
    Question::multi(
        "si_02a",
        "Which cloud platforms does your organization use? (Select all that apply)",
        &[
            "Microsoft 365 / Azure",
            "Google Workspace / GCP",
            "Amazon Web Services (AWS)",
            "Other SaaS applications",
            "On-premises only",
        ],
    )
    .depends_on("si_02", Expect::Flag(true))
    .controls(&["CM.2.061"]),
    Question::yes_no(
        "si_03",
        "Do you use any Government Furnished Equipment (GFE) or Government Furnished Information (GFI)?",
    )
    .help("GFE/GFI provided by the DoD may already be covered under separate authorization.")
    .controls(&["CM.2.062"]),
    Question::yes_no(
        PERSONAL_DEVICES,
        "Do employees use personal devices (BYOD) for any work-related activities, including email?",
    )
    .help("Personal devices that access company email or systems may bring CUI into scope.")
    .controls(&["AC.2.006", "CM.2.061"]),
    Question::yes_no(
        "si_05",
        "Does your organization have a documented system/asset inventory?",
    )
    .help("NIST 800-171 CM.2.062 requires maintaining a current inventory of organizational systems.")
    .controls(&["CM.2.062"]),
    Question::choice(
        "si_06",
        "How many active employees / users access your IT systems?",
        &["1–5", "6–25", "26–100", "101–500", "500+"],
    )
    .controls(&["AC.1.001"]),
    Question::yes_no(
        "si_07",
        "Do you use any Operational Technology (OT) or Industrial Control Systems (ICS) in your work?",
    )
    .help("Manufacturing equipment, sensors, or SCADA systems connected to your network may be in scope.")
    .controls(&["CM.2.062", "SC.3.180"]),
    Question::yes_no(
        "si_08",
        "Do any third-party vendors, subcontractors, or managed service providers have access to your systems?",
    )
    .help(
        "Third-party access can extend your CMMC assessment boundary. \
         If they handle CUI/FCI, they may also need CMMC certification.",
    )
    .controls(&["AC.2.006", "CM.2.062"]),
    Question::choice(
        "si_08a",
        "Do those third parties have their own CMMC certification or documented security controls?",
        &[
            "Yes — they are CMMC certified",
            "Yes — they have documented security controls (e.g., SOC 2, ISO 27001)",
            "No — unknown",
            "No — they have no formal certification",
        ],
    )
    .depends_on("si_08", Expect::Flag(true))
    .controls(&["AC.2.006"]),
    Question::yes_no(
        "si_09",
        "Do you have network diagrams or data flow diagrams for your environment?",
    )
    .help("These are required for a CMMC assessment and needed to define your System Security Plan (SSP).")
    .controls(&["CM.2.061"])
    .tags(&[Tag::GapFlag]),
];
