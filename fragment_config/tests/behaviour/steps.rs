//! Step definitions for the assembly scenarios.

use anyhow::{Context, Result, anyhow, ensure};
use fragment_config::{
    Assembler, Assembly, DirectorySource, Environment, Feature, FragmentError,
};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;
use test_helpers::fragments::FragmentDir;

use crate::fixtures::AssemblyState;

fn toggle(state: &AssemblyState, name: &str, enabled: bool) -> Result<()> {
    let feature: Feature = name.parse()?;
    let mut selection = state.selection.take().unwrap_or_default();
    selection.set(feature, enabled);
    state.selection.set(selection);
    Ok(())
}

fn with_assembly<T>(state: &AssemblyState, f: impl FnOnce(&Assembly) -> Result<T>) -> Result<T> {
    state
        .outcome
        .with_ref(|outcome| match outcome {
            Ok(assembly) => f(assembly),
            Err(err) => Err(anyhow!("assembly failed: {err}")),
        })
        .ok_or_else(|| anyhow!("no assembly has run"))?
}

#[given("the sample fragment directory")]
fn sample_directory(assembly_state: &AssemblyState) -> Result<()> {
    ensure!(
        assembly_state.fragments.is_empty(),
        "fragment directory already initialised"
    );
    assembly_state.fragments.set(FragmentDir::sample()?);
    Ok(())
}

#[given("the feature {name} is enabled")]
fn enable_feature(assembly_state: &AssemblyState, name: String) -> Result<()> {
    toggle(assembly_state, &name, true)
}

#[given("the feature {name} is disabled")]
fn disable_feature(assembly_state: &AssemblyState, name: String) -> Result<()> {
    toggle(assembly_state, &name, false)
}

#[given("the fragment file {file_name} is malformed")]
fn malformed_fragment(assembly_state: &AssemblyState, file_name: String) -> Result<()> {
    assembly_state
        .fragments
        .with_ref(|dir| dir.write(&file_name, "{ \"unterminated\": "))
        .context("fragment directory missing")?
}

#[when("the {environment} document is assembled")]
fn assemble(assembly_state: &AssemblyState, environment: String) -> Result<()> {
    let env: Environment = environment.parse()?;
    let root = assembly_state
        .fragments
        .with_ref(|dir| dir.path().to_path_buf())
        .context("fragment directory missing")?;
    let selection = assembly_state.selection.take().unwrap_or_default();
    let outcome = Assembler::new(DirectorySource::open(root)?, selection).assemble(env);
    assembly_state.outcome.set(outcome);
    Ok(())
}

#[then("the value at {pointer} is {expected}")]
fn value_at(assembly_state: &AssemblyState, pointer: String, expected: String) -> Result<()> {
    with_assembly(assembly_state, |assembly| {
        let actual = assembly.document().pointer(&pointer);
        ensure!(
            actual == Some(&json!(expected)),
            "{pointer} was {actual:?}, expected {expected}"
        );
        Ok(())
    })
}

#[then("the document has no {key} section")]
fn missing_section(assembly_state: &AssemblyState, key: String) -> Result<()> {
    with_assembly(assembly_state, |assembly| {
        ensure!(
            !assembly.document().contains_key(&key),
            "unexpected {key} section"
        );
        Ok(())
    })
}

#[then("the fragment {name} is reported as skipped")]
fn reported_skipped(assembly_state: &AssemblyState, name: String) -> Result<()> {
    with_assembly(assembly_state, |assembly| {
        ensure!(
            assembly
                .report()
                .skipped()
                .iter()
                .any(|skip| skip.name.as_str() == name),
            "{name} was not skipped"
        );
        Ok(())
    })
}

#[then("assembly fails because fragment {name} is invalid")]
fn fails_invalid(assembly_state: &AssemblyState, name: String) -> Result<()> {
    let matched = assembly_state
        .outcome
        .with_ref(|outcome| {
            matches!(
                outcome.as_ref().map_err(|err| &**err),
                Err(FragmentError::Invalid { id, .. }) if id.to_string() == name
            )
        })
        .context("no assembly has run")?;
    ensure!(matched, "assembly did not fail on fragment {name}");
    Ok(())
}
