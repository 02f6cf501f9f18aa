//! Single pure pass from a response store to a [`DerivedResult`].

use crate::catalog::data_flow::CUI_CATEGORY_UNSURE;
use crate::catalog::ids::*;
use crate::domain::models::{
    CmmcLevel, DerivedResult, EstimateBasis, Gap, Priority, ResponseStore, SystemEstimate,
};
use crate::services::rules;
use std::collections::BTreeSet;
use tracing::debug;

pub fn score(store: &ResponseStore) -> DerivedResult {
    let cui = cui_in_scope(store);
    let fci = fci_in_scope(store);
    let level = cmmc_level(cui, fci);
    let gaps = rules::evaluate_all(store);
    let high: Vec<Gap> = gaps
        .iter()
        .filter(|g| g.priority == Priority::High)
        .cloned()
        .collect();
    let controls = control_gaps(&gaps);

    debug!(cui, fci, %level, gaps = gaps.len(), "scored");

    DerivedResult {
        cui_in_scope: cui,
        fci_in_scope: fci,
        cmmc_level_required: level,
        enclave_recommended: enclave_recommended(store, cui),
        systems_in_scope: estimate_systems(store),
        gap_count: gaps.len(),
        high_priority_gaps: high,
        compliance_gaps: gaps,
        nist_control_gaps: controls,
        scope_reduction_possible: scope_reduction_possible(store),
    }
}

pub fn cui_in_scope(store: &ResponseStore) -> bool {
    let categories_confirm = store
        .selection(CUI_CATEGORY)
        .map(|cats| !cats.is_empty() && cats.iter().any(|c| c != CUI_CATEGORY_UNSURE))
        .unwrap_or(false);
    store.is_true(HANDLES_GOV_INFO) && (store.is_true(CONTRACT_CLAUSE) || categories_confirm)
}

pub fn fci_in_scope(store: &ResponseStore) -> bool {
    store.is_true(HANDLES_GOV_INFO) || store.is_true(FCI_ONLY)
}

pub fn cmmc_level(cui: bool, fci: bool) -> CmmcLevel {
    if cui {
        CmmcLevel::Level2
    } else if fci {
        CmmcLevel::Level1
    } else {
        CmmcLevel::NotRequired
    }
}

/// CUI present, no enclave confirmed, and either not every system is in
/// scope or the organization has not refused to isolate.
pub fn enclave_recommended(store: &ResponseStore, cui: bool) -> bool {
    let no_enclave = match store.get(HAS_ENCLAVE) {
        None => true,
        Some(_) => store.is_false(HAS_ENCLAVE),
    };
    let not_all = store.is_false(WHOLE_ENVIRONMENT);
    let willing = !store.is_false(WILLING_TO_ISOLATE);
    cui && no_enclave && (not_all || willing)
}

pub fn device_ceiling(bucket: Option<&str>) -> u32 {
    match bucket {
        Some("1–10") => 10,
        Some("11–50") => 50,
        Some("51–200") => 200,
        Some("201–500") => 500,
        Some("500+") => 999,
        _ => 10,
    }
}

pub fn estimate_systems(store: &ResponseStore) -> SystemEstimate {
    let total = device_ceiling(store.text(DEVICE_COUNT));
    if store.is_true(WHOLE_ENVIRONMENT) {
        return SystemEstimate::new(total, EstimateBasis::FullEnvironment);
    }
    let separation = store.text(SEPARATION).unwrap_or_default();
    if separation.contains("physically separate") || separation.contains("logically separated") {
        return SystemEstimate::new((total / 5).max(1), EstimateBasis::EnclaveOnly);
    }
    if separation.contains("Partially") {
        return SystemEstimate::new((total / 2).max(1), EstimateBasis::PartialSeparation);
    }
    SystemEstimate::new(total, EstimateBasis::FullEnvironment)
}

pub fn scope_reduction_possible(store: &ResponseStore) -> bool {
    store.is_false(WHOLE_ENVIRONMENT)
        && (store.is_true(CAN_SEPARATE) || store.is_true(WILLING_TO_ISOLATE))
}

/// Deduplicated, sorted control identifiers across `gaps`.
pub fn control_gaps(gaps: &[Gap]) -> Vec<String> {
    gaps.iter()
        .flat_map(|g| g.control_ids())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
