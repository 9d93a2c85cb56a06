#[cfg(test)]
mod tests {
    use crate::actuator_remapper::{ActuatorMapping, ActuatorSchema};
    use crate::pipeline::{RetargetConfig, Retargeter};
    use crate::retarget_error::RetargetError;
    use crate::rotation_angles::PartialGroupPolicy;
    use crate::skeleton::HandTaxonomy;

    const READ_ERROR: &'static str = "Failed to load configuration from file";

    #[test]
    fn test_config_from_yaml() {
        let filename = "src/tests/data/reduced_hand.yaml";
        let loaded = RetargetConfig::from_yaml_file(filename).expect(READ_ERROR);

        assert_eq!(loaded.schema.columns(), &["F1J2", "F1J1", "F2J2", "F2J1", "TJ2", "TJ1", "WRJ1"]);
        assert_eq!(loaded.mapping.pairs().len(), 6);
        assert_eq!(loaded.mapping.source_of("F1J1"), Some("Index2"));
        assert_eq!(loaded.mapping.source_of("WRJ1"), None);
        assert_eq!(loaded.partial_group, PartialGroupPolicy::Drop);

        // Keys not present keep the built-in hand
        assert_eq!(loaded.taxonomy, HandTaxonomy::default());
        assert_eq!(loaded.labels.lookup("Body_Head"), Some("Index2"));

        assert!(Retargeter::new(loaded).is_ok());
    }

    #[test]
    fn test_config_ambiguous_mapping() {
        let filename = "src/tests/data/ambiguous_mapping.yaml";
        match RetargetConfig::from_yaml_file(filename) {
            Err(RetargetError::MappingAmbiguityError { actuator, joints }) => {
                assert_eq!(actuator, "FFJ2");
                assert_eq!(joints, vec!["Index2".to_string(), "Middle2".to_string()]);
            }
            Err(other) => panic!("Expected mapping ambiguity, got {}", other),
            Ok(_) => panic!("Expected mapping ambiguity, configuration was accepted"),
        }
    }

    #[test]
    fn test_config_unknown_key() {
        let filename = "src/tests/data/unknown_key.yaml";
        assert!(matches!(
            RetargetConfig::from_yaml_file(filename),
            Err(RetargetError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_missing_file() {
        assert!(matches!(
            RetargetConfig::from_yaml_file("src/tests/data/no_such_file.yaml"),
            Err(RetargetError::IoError(_))
        ));
    }

    #[test]
    fn test_config_from_inline_yaml() {
        let contents = r#"
canonical_joints: [Wrist, Knuckle, Tip]
joint_labels:
  J0: Wrist
  J1: Knuckle
  J2: Tip
actuator_columns: [A1, A2]
actuator_mapping:
  Knuckle: A2
partial_group: fail
"#;
        let config = RetargetConfig::from_yaml(contents).expect("valid yaml");
        assert_eq!(config.taxonomy.group_size(), 3);
        assert_eq!(config.schema, ActuatorSchema::new(&["A1", "A2"]).expect("valid"));
        assert_eq!(config.mapping, ActuatorMapping::new([("Knuckle", "A2")]).expect("valid"));
        assert_eq!(config.partial_group, PartialGroupPolicy::Fail);
    }

    #[test]
    fn test_config_duplicate_canonical_joint() {
        let contents = "canonical_joints: [Wrist, Tip, Wrist]\n";
        assert!(matches!(
            RetargetConfig::from_yaml(contents),
            Err(RetargetError::ConfigurationError(_))
        ));
    }
}
