//! `rstest-bdd` scenarios for fragment assembly.

mod fixtures;
mod steps;

use fixtures::{AssemblyState, assembly_state};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/assembly.feature",
    fixtures = [assembly_state: AssemblyState]
);
