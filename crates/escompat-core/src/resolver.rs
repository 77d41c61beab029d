//! Classifies detected features against the support database.

use crate::database::SupportDatabase;
use crate::env::EnvironmentId;
use crate::records::{ErrorKey, ErrorRecord, FileErrors};
use crate::visitor::DetectionOutcome;

/// Turns one file's detection outcome into error records for `targets`.
///
/// Environment lists keep the order of `targets`. Features supported by every
/// target produce no record.
pub fn resolve(
    outcome: DetectionOutcome,
    database: &dyn SupportDatabase,
    targets: &[EnvironmentId],
) -> FileErrors {
    let mut errors = FileErrors::new();

    let report = match outcome {
        DetectionOutcome::Report(report) => report,
        DetectionOutcome::ParseFailed(message) => {
            errors.insert(ErrorKey::Parse, ErrorRecord::Parse { message });
            return errors;
        }
    };

    for (feature, matches) in report {
        let Some(support) = database.support_of(&feature) else {
            tracing::debug!(%feature, "feature has no database entry");
            errors.insert(
                ErrorKey::Feature(feature.clone()),
                ErrorRecord::FeatureUndefined { feature },
            );
            continue;
        };

        let incompat_envs: Vec<EnvironmentId> = targets
            .iter()
            .filter(|env| support.is_incompatible(env))
            .cloned()
            .collect();
        let partial_envs: Vec<EnvironmentId> = targets
            .iter()
            .filter(|env| support.is_partial(env))
            .cloned()
            .collect();

        if incompat_envs.is_empty() && partial_envs.is_empty() {
            continue;
        }

        errors.insert(
            ErrorKey::Feature(feature.clone()),
            ErrorRecord::Incompatibility {
                feature,
                matches,
                incompat_envs,
                partial_envs,
            },
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::CompatTable;
    use crate::features::FeatureId;
    use crate::features::testing::node;
    use crate::records::{FeatureReport, MatchRecord};
    use crate::syntax::NodeKind;

    fn env(s: &str) -> EnvironmentId {
        s.parse().unwrap()
    }

    fn envs(ids: &[&str]) -> Vec<EnvironmentId> {
        ids.iter().map(|s| env(s)).collect()
    }

    fn database() -> CompatTable {
        CompatTable::from_json(
            r#"{
                "environments": ["a1", "b1", "c1"],
                "features": {
                    "demo": { "incompatible": ["a1"], "partial": ["b1"] },
                    "supported": {}
                }
            }"#,
        )
        .unwrap()
    }

    fn record(id: &str) -> MatchRecord {
        let node = node(NodeKind::TemplateLiteral);
        MatchRecord {
            range: node.range,
            location: node.location,
            feature: FeatureId::new(id),
        }
    }

    fn outcome(ids: &[&str]) -> DetectionOutcome {
        let report: FeatureReport = ids
            .iter()
            .map(|id| (FeatureId::new(*id), vec![record(id)]))
            .collect();
        DetectionOutcome::Report(report)
    }

    #[test]
    fn intersects_requested_environments() {
        let errors = resolve(outcome(&["demo"]), &database(), &envs(&["a1", "b1", "c1"]));

        let entry = &errors[&ErrorKey::Feature(FeatureId::new("demo"))];
        match entry {
            ErrorRecord::Incompatibility {
                feature,
                matches,
                incompat_envs,
                partial_envs,
            } => {
                assert_eq!(feature.as_str(), "demo");
                assert_eq!(matches, &vec![record("demo")]);
                assert_eq!(incompat_envs, &envs(&["a1"]));
                assert_eq!(partial_envs, &envs(&["b1"]));
            }
            other => panic!("expected an incompatibility, got {other:?}"),
        }
    }

    #[test]
    fn no_record_when_targets_support_feature() {
        let errors = resolve(outcome(&["demo", "supported"]), &database(), &envs(&["c1"]));

        assert!(errors.is_empty());
    }

    #[test]
    fn partial_support_alone_is_reported() {
        let errors = resolve(outcome(&["demo"]), &database(), &envs(&["b1"]));

        let entry = &errors[&ErrorKey::Feature(FeatureId::new("demo"))];
        assert!(entry.incompat_envs().is_empty());
        assert!(matches!(
            entry,
            ErrorRecord::Incompatibility { partial_envs, .. } if partial_envs == &envs(&["b1"])
        ));
    }

    #[test]
    fn unknown_feature_is_undefined() {
        let errors = resolve(outcome(&["mystery"]), &database(), &envs(&["a1"]));

        assert_eq!(
            errors[&ErrorKey::Feature(FeatureId::new("mystery"))],
            ErrorRecord::FeatureUndefined {
                feature: FeatureId::new("mystery")
            }
        );
    }

    #[test]
    fn undefined_features_are_reported_without_targets() {
        let errors = resolve(outcome(&["mystery", "demo"]), &database(), &[]);

        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&ErrorKey::Feature(FeatureId::new("mystery"))));
    }

    #[test]
    fn parse_failure_yields_single_parse_record() {
        let errors = resolve(
            DetectionOutcome::ParseFailed("Unexpected token (1:7)".to_string()),
            &database(),
            &envs(&["a1"]),
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[&ErrorKey::Parse],
            ErrorRecord::Parse {
                message: "Unexpected token (1:7)".to_string()
            }
        );
    }

    #[test]
    fn environment_order_follows_request() {
        let database = CompatTable::from_json(
            r#"{ "features": { "demo": { "incompatible": ["a1", "z9"] } } }"#,
        )
        .unwrap();

        let errors = resolve(outcome(&["demo"]), &database, &envs(&["z9", "a1"]));

        let entry = &errors[&ErrorKey::Feature(FeatureId::new("demo"))];
        assert_eq!(entry.incompat_envs(), envs(&["z9", "a1"]).as_slice());
    }
}
