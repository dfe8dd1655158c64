//! Behavioural tests against the public API

use facet_validation::prelude::*;
use facet_validation::registry;
use serde_json::{json, Value};

fn run(raw: Value) -> ValidationOutcome {
    facet_validation::validate_value(raw).expect("object input")
}

#[test]
fn registry_tables_are_sound() {
    assert!(registry().check().is_empty());
}

#[test]
fn satisfaction_synonyms_and_catch_all_merge() {
    let outcome = run(json!({
        "user_satisfaction_counts": {
            "neutral": 1,
            "likely_satisfied": 2,
            "meh": 1,
            "impressed": 1.7,
            "relieved": false
        }
    }));
    assert_eq!(
        outcome.facet["user_satisfaction_counts"],
        json!({"likely_satisfied": 4, "happy": 1})
    );
    let map_repairs = outcome
        .coercions
        .iter()
        .filter(|c| c.path.starts_with("user_satisfaction_counts."))
        .count();
    assert_eq!(map_repairs, 3);
}

#[test]
fn non_object_maps_become_empty_without_coercion() {
    let base = run(json!({}));
    let outcome = run(json!({"friction_counts": ["tool_misuse"], "user_satisfaction_counts": "happy"}));
    assert_eq!(outcome.facet["friction_counts"], json!({}));
    assert_eq!(outcome.facet["user_satisfaction_counts"], json!({}));
    assert_eq!(outcome.coercion_count(), base.coercion_count());
}

#[test]
fn every_enum_field_lands_in_its_domain() {
    let outcome = run(json!({
        "outcome": 42,
        "claude_helpfulness": ["helpful"],
        "session_type": {"type": "debugging"},
        "primary_success": null,
        "session_complexity": true,
        "recovery_quality": "",
        "root_cause_depth": "bedrock"
    }));
    let reg = registry();
    let facet = &outcome.facet;
    let value = |field: &str| facet[field].as_str().expect("string").to_string();
    assert!(reg.outcome.contains(&value("outcome")));
    assert!(reg.helpfulness.contains(&value("claude_helpfulness")));
    assert!(reg.session_type.contains(&value("session_type")));
    assert!(reg.primary_success.contains(&value("primary_success")));
    assert!(reg.session_complexity.contains(&value("session_complexity")));
    assert!(reg.recovery_quality.contains(&value("recovery_quality")));
    assert!(reg.root_cause_depth.contains(&value("root_cause_depth")));
    assert_eq!(outcome.coercion_count(), 7);
}

#[test]
fn overrides_apply_before_validation() {
    let overrides = MetadataOverrides {
        session_id: Some("ABC".to_string()),
        facet_model: Some("sonnet".to_string()),
        ..Default::default()
    };
    let outcome = facet_validation::process("{\"outcome\": \"fully_achieved\"}", &overrides).unwrap();
    assert_eq!(outcome.facet["session_id"], "ABC");
    assert_eq!(outcome.facet["facet_model"], "sonnet");
    assert_eq!(outcome.facet["source"], "self-improve");
}

#[test]
fn concurrent_validation_needs_no_coordination() {
    let inputs: Vec<Value> = (0..16)
        .map(|i| json!({"session_id": i, "friction_counts": {"wrong_tool": i + 1}}))
        .collect();

    let outcomes: Vec<ValidationOutcome> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .cloned()
            .map(|input| scope.spawn(move || run(input)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.facet["friction_counts"], json!({"tool_misuse": i + 1}));
        assert_eq!(outcome.facet["recovery_quality"], "good");
    }
}

#[test]
fn output_is_two_space_pretty_json() {
    let outcome = run(json!({"outcome": "fully_achieved"}));
    let text = to_pretty_json(&outcome.facet).unwrap();
    assert!(text.starts_with("{\n  \"outcome\": \"fully_achieved\",\n"));
}
