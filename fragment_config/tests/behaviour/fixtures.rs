//! Scenario state shared between assembly steps.

use fragment_config::{Assembly, FeatureSelection, FragmentResult};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::fragments::FragmentDir;

/// Inputs and outcome of one assembly scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct AssemblyState {
    pub fragments: Slot<FragmentDir>,
    pub selection: Slot<FeatureSelection>,
    pub outcome: Slot<FragmentResult<Assembly>>,
}

/// Provides a clean state for each scenario.
#[fixture]
pub fn assembly_state() -> AssemblyState {
    AssemblyState::default()
}
