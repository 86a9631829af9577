//! Editor text form of request documents and the spec overlay used by updates

use pipectl::api::{ActivateIntegratedServiceRequest, ClusterGroupDeployment};
use pipectl::lifecycle::SpecDocument;
use pipectl::services::overlay;
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ./:-]{0,16}".prop_map(Value::from),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-zA-Z]{1,10}", json_value(), 0..5)
        .prop_map(|m| m.into_iter().collect())
}

fn deployment() -> impl Strategy<Value = ClusterGroupDeployment> {
    (
        "[a-z][a-z0-9-]{0,12}",
        "[a-z]{1,8}/[a-z]{1,8}",
        proptest::option::of("[0-9]\\.[0-9]\\.[0-9]"),
        proptest::option::of("[a-z]{1,10}"),
        object(),
        prop::collection::btree_map("[a-z]{1,8}", object(), 0..3),
        any::<(bool, bool, bool, bool)>(),
        proptest::option::of(0i64..3600),
    )
        .prop_map(
            |(release_name, name, version, namespace, values, overrides, flags, timeout)| {
                ClusterGroupDeployment {
                    release_name,
                    name,
                    version,
                    namespace,
                    values,
                    value_overrides: overrides.into_iter().collect::<BTreeMap<_, _>>(),
                    re_use_values: flags.0,
                    dry_run: flags.1,
                    wait: flags.2,
                    atomic: flags.3,
                    timeout,
                }
            },
        )
}

/// Rendering a service request for the editor and reading it back is lossless.
#[test]
fn test_service_request_text_is_lossless() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&object(), |spec| {
            let request = ActivateIntegratedServiceRequest { spec };
            let text = request.render().unwrap();
            let parsed = ActivateIntegratedServiceRequest::parse(&text).unwrap();
            prop_assert_eq!(parsed, request);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_deployment_text_is_lossless() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&deployment(), |deployment| {
            let text = deployment.render().unwrap();
            prop_assert_eq!(ClusterGroupDeployment::parse(&text).unwrap(), deployment);
            Ok(())
        })
        .unwrap();
}

/// The validator sees the whole deployment but only the `spec` member of a service request.
#[test]
fn test_spec_view_of_rendered_documents() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(object(), deployment()), |(spec, deployment)| {
            let request = ActivateIntegratedServiceRequest { spec: spec.clone() };
            let raw: Value = serde_json::from_str(&request.render().unwrap()).unwrap();
            prop_assert_eq!(
                ActivateIntegratedServiceRequest::spec_view(&raw),
                &Value::Object(spec)
            );

            let raw: Value = serde_json::from_str(&deployment.render().unwrap()).unwrap();
            prop_assert_eq!(ClusterGroupDeployment::spec_view(&raw), &raw);
            Ok(())
        })
        .unwrap();
}

/// Overlaying answers keeps every key only the current spec knows and takes every answer.
#[test]
fn test_overlay_keeps_unknown_keys() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(object(), object()), |(base, answers)| {
            let mut merged = base.clone();
            overlay(&mut merged, answers.clone());

            for (key, value) in &base {
                if !answers.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
            for (key, value) in &answers {
                match (base.get(key), value) {
                    (Some(Value::Object(_)), Value::Object(_)) => {
                        prop_assert!(merged[key].is_object());
                    }
                    _ => prop_assert_eq!(merged.get(key), Some(value)),
                }
            }

            let mut again = merged.clone();
            overlay(&mut again, answers);
            prop_assert_eq!(again, merged);
            Ok(())
        })
        .unwrap();
}
