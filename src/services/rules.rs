//! Gap rules, evaluated in table order.
//!
//! Each rule reads raw answers only. A missing or differently-typed answer
//! reads as "not triggered". String rules match substrings of the stored
//! choice text, so rewording a choice can silently disarm a rule; the
//! substrings are listed in [`WORDING_ANCHORS`] and checked by catalog
//! validation.

use crate::catalog::ids::*;
use crate::domain::models::{Gap, Priority, ResponseStore};
use tracing::debug;

pub enum Detail {
    Fixed(&'static str),
    Derived(fn(&ResponseStore) -> String),
}

pub struct GapRule {
    pub id: &'static str,
    pub controls: &'static str,
    pub title: &'static str,
    pub priority: Priority,
    pub trigger: fn(&ResponseStore) -> bool,
    pub detail: Detail,
}

impl GapRule {
    pub fn evaluate(&self, store: &ResponseStore) -> Option<Gap> {
        if !(self.trigger)(store) {
            return None;
        }
        debug!(rule = self.id, priority = %self.priority, "gap triggered");
        let detail = match &self.detail {
            Detail::Fixed(text) => text.to_string(),
            Detail::Derived(f) => f(store),
        };
        Some(Gap {
            rule: self.id.to_string(),
            nist_control: self.controls.to_string(),
            title: self.title.to_string(),
            detail,
            priority: self.priority,
        })
    }
}

/// `(question id, substring)` pairs the string-matching rules and the
/// system estimate depend on.
pub const WORDING_ANCHORS: &[(&str, &str)] = &[
    (MFA, "No — password"),
    (MFA, "Partial"),
    (REMOTE_ACCESS, "no MFA"),
    (REMOTE_ACCESS, "direct RDP"),
    (ENCRYPTION_AT_REST, "No"),
    (ENCRYPTION_AT_REST, "not sure"),
    (ENCRYPTION_IN_TRANSIT, "plaintext"),
    (ENCRYPTION_IN_TRANSIT, "not sure"),
    (SEPARATION, "No — all systems share"),
    (SEPARATION, "physically separate"),
    (SEPARATION, "logically separated"),
    (SEPARATION, "Partially"),
    (SHARED_SERVICE_LIST, "None"),
    (AUDIT_LOGGING, "No logging"),
    (REMOVABLE_MEDIA, "unrestricted"),
    (REMOVABLE_MEDIA, "No —"),
    (AWARENESS_TRAINING, "No formal"),
    (SUB_CERTIFICATION, "no known"),
    (SUB_CERTIFICATION, "not sure"),
];

fn text_has(store: &ResponseStore, id: &str, needle: &str) -> bool {
    store.text(id).map(|t| t.contains(needle)).unwrap_or(false)
}

fn text_has_lower(store: &ResponseStore, id: &str, needle: &str) -> bool {
    store
        .text(id)
        .map(|t| t.to_lowercase().contains(needle))
        .unwrap_or(false)
}

fn shared_services(store: &ResponseStore) -> Option<&[String]> {
    if !store.is_true(SHARED_SERVICES) {
        return None;
    }
    store
        .selection(SHARED_SERVICE_LIST)
        .filter(|s| !s.is_empty() && !s.iter().any(|item| item.contains("None")))
}

fn shared_services_detail(store: &ResponseStore) -> String {
    let names = shared_services(store).map(|s| s.join(", ")).unwrap_or_default();
    format!(
        "Shared services ({}) that span both CUI and non-CUI environments \
         bring additional systems into CMMC scope.",
        names
    )
}

pub static RULES: &[GapRule] = &[
    GapRule {
        id: "mfa",
        controls: "IA.3.083",
        title: "Multi-Factor Authentication Not Fully Implemented",
        priority: Priority::High,
        trigger: |r| text_has(r, MFA, "No — password") || text_has(r, MFA, "Partial"),
        detail: Detail::Fixed(
            "MFA is required for all access to CUI systems under NIST 800-171 Rev 3 IA.3.083. \
             Password-only authentication is not compliant.",
        ),
    },
    GapRule {
        id: "remote_access",
        controls: "AC.1.001 / IA.3.083",
        title: "Remote Access Lacks MFA or VPN Protection",
        priority: Priority::High,
        trigger: |r| text_has(r, REMOTE_ACCESS, "no MFA") || text_has(r, REMOTE_ACCESS, "direct RDP"),
        detail: Detail::Fixed(
            "Remote access to CUI systems must use MFA and encrypted channels (VPN). \
             Direct RDP/SSH without VPN is a critical exposure.",
        ),
    },
    GapRule {
        id: "encryption_at_rest",
        controls: "SC.3.177",
        title: "CUI Not Encrypted at Rest",
        priority: Priority::High,
        trigger: |r| {
            text_has(r, ENCRYPTION_AT_REST, "No") || text_has_lower(r, ENCRYPTION_AT_REST, "not sure")
        },
        detail: Detail::Fixed(
            "NIST SC.3.177 requires CUI to be encrypted at rest using FIPS 140-2 validated \
             cryptographic modules. Unencrypted CUI storage is a critical gap.",
        ),
    },
    GapRule {
        id: "encryption_in_transit",
        controls: "SC.3.177",
        title: "CUI Not Encrypted in Transit",
        priority: Priority::High,
        trigger: |r| {
            text_has_lower(r, ENCRYPTION_IN_TRANSIT, "plaintext")
                || text_has_lower(r, ENCRYPTION_IN_TRANSIT, "not sure")
        },
        detail: Detail::Fixed(
            "CUI transmitted over networks must be encrypted (TLS 1.2+ or equivalent). \
             Plaintext transmission is a critical compliance failure.",
        ),
    },
    GapRule {
        id: "network_segmentation",
        controls: "SC.3.180",
        title: "No Network Segmentation for CUI Systems",
        priority: Priority::High,
        trigger: |r| text_has(r, SEPARATION, "No — all systems share"),
        detail: Detail::Fixed(
            "CUI systems should be on an isolated network segment or enclave. \
             Flat networks where all systems share the same segment expand CMMC scope significantly.",
        ),
    },
    GapRule {
        id: "shared_services",
        controls: "SC.3.180 / AC.1.001",
        title: "Shared Services Span CUI and Non-CUI Environments",
        priority: Priority::High,
        trigger: |r| shared_services(r).is_some(),
        detail: Detail::Derived(shared_services_detail),
    },
    GapRule {
        id: "ssp_missing",
        controls: "CM.2.061",
        title: "No System Security Plan (SSP)",
        priority: Priority::High,
        trigger: |r| r.is_false(HAS_SSP),
        detail: Detail::Fixed(
            "A written SSP documenting your system boundary, security controls, and NIST 800-171 \
             implementation is required for CMMC Level 2 assessment.",
        ),
    },
    GapRule {
        id: "sprs_missing",
        controls: "CM.2.061",
        title: "SPRS Score Not Submitted",
        priority: Priority::Medium,
        trigger: |r| r.is_false(SPRS_SUBMITTED),
        detail: Detail::Fixed(
            "DoD contractors must submit a NIST SP 800-171 self-assessment score to SPRS. \
             Failure to do so may violate contract requirements.",
        ),
    },
    GapRule {
        id: "audit_logging",
        controls: "AU.2.041",
        title: "No Audit Logging on CUI Systems",
        priority: Priority::High,
        trigger: |r| text_has(r, AUDIT_LOGGING, "No logging"),
        detail: Detail::Fixed(
            "NIST AU.2.041 requires audit records for user activities on CUI systems. \
             No logging means you cannot detect or investigate security incidents.",
        ),
    },
    GapRule {
        id: "privileged_accounts",
        controls: "AC.1.002",
        title: "No Separation of Privileged and Standard Accounts",
        priority: Priority::Medium,
        trigger: |r| r.is_false(PRIVILEGED_SEPARATION),
        detail: Detail::Fixed(
            "Admin/privileged accounts should be separate from standard user accounts \
             to limit the blast radius of a compromised credential.",
        ),
    },
    GapRule {
        id: "removable_media",
        controls: "AC.2.006 / MP.2.119",
        title: "Removable Media Not Controlled",
        priority: Priority::Medium,
        trigger: |r| {
            text_has_lower(r, REMOVABLE_MEDIA, "unrestricted") || text_has(r, REMOVABLE_MEDIA, "No —")
        },
        detail: Detail::Fixed(
            "USB and removable media use on CUI systems must be restricted and controlled. \
             Unrestricted USB access is a common data exfiltration vector.",
        ),
    },
    GapRule {
        id: "personal_devices",
        controls: "AC.1.001 / MP.2.119",
        title: "Personal Devices (BYOD) Used for Work Activities",
        priority: Priority::Medium,
        trigger: |r| r.is_true(PERSONAL_DEVICES),
        detail: Detail::Fixed(
            "Personal devices accessing company email or systems may bring CUI into an uncontrolled \
             environment. BYOD policies and MDM controls are required.",
        ),
    },
    GapRule {
        id: "awareness_training",
        controls: "AT.2.056",
        title: "No Formal Cybersecurity Awareness Training Program",
        priority: Priority::Medium,
        trigger: |r| text_has(r, AWARENESS_TRAINING, "No formal"),
        detail: Detail::Fixed(
            "NIST AT.2.056 requires all users with access to CUI systems to receive \
             periodic security awareness training.",
        ),
    },
    GapRule {
        id: "subcontractor_certification",
        controls: "AC.2.006",
        title: "Subcontractors Handling CUI Lack CMMC Certification",
        priority: Priority::High,
        trigger: |r| {
            r.text(SUB_CERTIFICATION).map(|t| !t.is_empty()).unwrap_or(false)
                && (text_has_lower(r, SUB_CERTIFICATION, "no known")
                    || text_has_lower(r, SUB_CERTIFICATION, "not sure"))
        },
        detail: Detail::Fixed(
            "Subcontractors who receive CUI may be required to obtain their own CMMC certification \
             under the flow-down requirements of DFARS 252.204-7021.",
        ),
    },
];

/// Every triggered gap, in table order.
pub fn evaluate_all(store: &ResponseStore) -> Vec<Gap> {
    RULES.iter().filter_map(|rule| rule.evaluate(store)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, Catalog};
    use crate::domain::models::Answer;
    use std::collections::HashSet;

    fn store(entries: &[(&str, Answer)]) -> ResponseStore {
        entries
            .iter()
            .map(|(id, a)| (id.to_string(), a.clone()))
            .collect()
    }

    fn text(s: &str) -> Answer {
        Answer::Text(s.to_string())
    }

    fn fired(store: &ResponseStore) -> Vec<String> {
        evaluate_all(store).into_iter().map(|g| g.rule).collect()
    }

    #[test]
    fn rule_ids_are_unique() {
        let ids: HashSet<&str> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), RULES.len());
        assert_eq!(RULES.len(), 14);
    }

    #[test]
    fn anchors_match_standard_catalog() {
        catalog::validate(&Catalog::standard(), WORDING_ANCHORS).expect("anchors present");
    }

    #[test]
    fn password_only_mfa_yields_single_high_gap() {
        let weak = store(&[(MFA, text("No — password-only authentication is used"))]);
        let gaps = evaluate_all(&weak);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].priority, Priority::High);
        assert_eq!(gaps[0].nist_control, "IA.3.083");

        let strong = store(&[(MFA, text("Yes — MFA enforced for all users (local and remote)"))]);
        assert!(evaluate_all(&strong).is_empty());
    }

    #[test]
    fn empty_store_triggers_nothing() {
        assert!(evaluate_all(&ResponseStore::new()).is_empty());
    }

    #[test]
    fn wrong_answer_type_never_triggers() {
        let r = store(&[
            (HAS_SSP, text("No")),
            (MFA, Answer::Flag(false)),
            (PERSONAL_DEVICES, text("yes")),
        ]);
        assert!(evaluate_all(&r).is_empty());
    }

    #[test]
    fn encryption_rules_mix_case_handling() {
        let r = store(&[
            (ENCRYPTION_AT_REST, text("I am not sure")),
            (ENCRYPTION_IN_TRANSIT, text("No — CUI is sent in plaintext")),
        ]);
        assert_eq!(fired(&r), vec!["encryption_at_rest", "encryption_in_transit"]);

        // "Yes — some ..." has neither "No" nor "not sure"
        let ok = store(&[(ENCRYPTION_AT_REST, text("Yes — some storage locations use encryption"))]);
        assert!(evaluate_all(&ok).is_empty());
    }

    #[test]
    fn shared_services_detail_names_services() {
        let r = store(&[
            (SHARED_SERVICES, Answer::Flag(true)),
            (
                SHARED_SERVICE_LIST,
                Answer::Selection(vec!["DNS servers".into(), "DHCP servers".into()]),
            ),
        ]);
        let gaps = evaluate_all(&r);
        assert_eq!(gaps.len(), 1);
        assert!(gaps[0].detail.contains("(DNS servers, DHCP servers)"));

        let separated = store(&[
            (SHARED_SERVICES, Answer::Flag(true)),
            (
                SHARED_SERVICE_LIST,
                Answer::Selection(vec![
                    "DNS servers".into(),
                    "None — shared services are separated".into(),
                ]),
            ),
        ]);
        assert!(evaluate_all(&separated).is_empty());
    }

    #[test]
    fn explicit_false_flags() {
        let r = store(&[
            (HAS_SSP, Answer::Flag(false)),
            (SPRS_SUBMITTED, Answer::Flag(false)),
            (PRIVILEGED_SEPARATION, Answer::Flag(false)),
            (PERSONAL_DEVICES, Answer::Flag(false)),
        ]);
        assert_eq!(fired(&r), vec!["ssp_missing", "sprs_missing", "privileged_accounts"]);
    }

    #[test]
    fn rules_fire_in_table_order() {
        let r = store(&[
            (SUB_CERTIFICATION, text("No — no known certification")),
            (AWARENESS_TRAINING, text("No formal training program")),
            (MFA, text("Partially implemented")),
            (REMOVABLE_MEDIA, text("No — unrestricted USB usage")),
        ]);
        assert_eq!(
            fired(&r),
            vec![
                "mfa",
                "removable_media",
                "awareness_training",
                "subcontractor_certification"
            ]
        );
    }
}
