//! Property-based tests for the environment chain, argument parsing and the
//! script parser

use fsl::{Argument, ArgumentValue, Environment, FrameId, Lookup, Script};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

fn name() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

/// Builds a linear chain root -> ... -> leaf of `depth` extra frames, binding
/// each (frame index, name, value) triple into its frame.
fn build_chain(depth: usize, bindings: &[(usize, String, String)]) -> (Environment, Vec<FrameId>) {
    let mut env = Environment::new();
    let mut frames = vec![env.root()];
    for _ in 0..depth {
        let parent = *frames.last().unwrap();
        frames.push(env.push_frame(parent));
    }
    for (index, name, value) in bindings {
        env.define_var(frames[index % frames.len()], name.as_str(), value.as_str());
    }
    (env, frames)
}

fn bindings() -> impl Strategy<Value = Vec<(usize, String, String)>> {
    prop::collection::vec((0usize..8, name(), "[a-z0-9]{0,3}"), 0..12)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn absent_names_are_not_found(depth in 0usize..6, binds in bindings()) {
        let (env, frames) = build_chain(depth, &binds);
        let leaf = *frames.last().unwrap();
        prop_assert_eq!(env.get_var(leaf, "ABSENT", Lookup::Local), None);
        prop_assert_eq!(env.get_var(leaf, "ABSENT", Lookup::Chain), None);
    }

    #[test]
    fn set_var_never_shadows(depth in 1usize..6, binds in bindings(), target in name()) {
        let (mut env, frames) = build_chain(depth, &binds);
        let leaf = *frames.last().unwrap();
        let owner = frames
            .iter()
            .rev()
            .copied()
            .find(|f| env.get_var(*f, &target, Lookup::Local).is_some());
        let before: Vec<_> = frames.iter().map(|f| env.variables(*f)).collect();

        env.set_var(leaf, &target, "NEW");

        let expected_owner = owner.unwrap_or(env.root());
        for (i, frame) in frames.iter().enumerate() {
            let mut expected = before[i].clone();
            if *frame == expected_owner {
                expected.insert(target.clone(), "NEW".to_string());
            }
            prop_assert_eq!(env.variables(*frame), expected);
        }
    }

    #[test]
    fn update_and_delete_absent_mutate_nothing(depth in 0usize..6, binds in bindings()) {
        let (mut env, frames) = build_chain(depth, &binds);
        let leaf = *frames.last().unwrap();
        let before: Vec<_> = frames.iter().map(|f| env.variables(*f)).collect();

        prop_assert!(!env.update_var(leaf, "ABSENT", "x"));
        prop_assert!(!env.delete_var(leaf, "ABSENT"));

        let after: Vec<_> = frames.iter().map(|f| env.variables(*f)).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn chain_lookup_agrees_with_nearest_local(depth in 0usize..6, binds in bindings(), target in name()) {
        let (env, frames) = build_chain(depth, &binds);
        let leaf = *frames.last().unwrap();
        let nearest = frames
            .iter()
            .rev()
            .find_map(|f| env.get_var(*f, &target, Lookup::Local));
        prop_assert_eq!(env.get_var(leaf, &target, Lookup::Chain), nearest);
    }

    #[test]
    fn sigil_classification(raw in "[$#a-z]{0,6}") {
        let arg = Argument::parse("p", &raw);
        match raw.chars().next() {
            Some('$') => prop_assert_eq!(arg.value, ArgumentValue::Param(raw[1..].to_string())),
            Some('#') => prop_assert_eq!(arg.value, ArgumentValue::Ref(raw[1..].to_string())),
            _ => prop_assert_eq!(arg.value, ArgumentValue::Literal(raw.clone())),
        }
    }

    #[test]
    fn parser_never_panics(source in r"[\x20-\x7E]{0,200}") {
        let _ = source.parse::<Script>();
    }
}
