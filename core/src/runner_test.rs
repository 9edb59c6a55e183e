#[cfg(test)]
mod tests {
    use crate::aggregate::Ratio;
    use crate::config::{HarnessConfig, ScenarioOverride};
    use crate::error::{BenchError, Result, ScenarioFailure};
    use crate::registry::VariantRegistry;
    use crate::runner::{DynScenario, Scenario, ScenarioMeta, ScenarioRunner};
    use crate::workload::Workload;
    use anyhow::bail;

    struct Numbers(Vec<u64>);

    impl Workload for Numbers {
        fn summary(&self) -> String {
            format!("{} numbers", self.0.len())
        }
    }

    #[derive(Default)]
    struct SumScenario {
        broken: Vec<&'static str>,
        duplicate: bool,
        empty: bool,
    }

    impl ScenarioMeta for SumScenario {
        fn name(&self) -> &'static str {
            "sum"
        }

        fn title(&self) -> &'static str {
            "Summing numbers"
        }
    }

    impl Scenario for SumScenario {
        type Workload = Numbers;

        fn default_repetitions(&self) -> Option<u32> {
            Some(20)
        }

        fn build(&self, config: &HarnessConfig) -> Result<Numbers> {
            Ok(Numbers((0..config.collection_size as u64).collect()))
        }

        fn register(&self, registry: &mut VariantRegistry<Numbers>) -> Result<()> {
            if self.empty {
                return Ok(());
            }
            for name in ["fold", "iter-sum", "closed-form"] {
                if self.broken.contains(&name) {
                    registry.register_fallible(name, |_: &Numbers| -> anyhow::Result<u64> { bail!("broken on purpose") })?;
                    continue;
                }
                match name {
                    "fold" => registry.register(name, |w: &Numbers| w.0.iter().fold(0u64, |acc, x| acc + x))?,
                    "iter-sum" => registry.register(name, |w: &Numbers| w.0.iter().sum::<u64>())?,
                    _ => registry.register(name, |w: &Numbers| {
                        let n = w.0.len() as u64;
                        n * n.saturating_sub(1) / 2
                    })?,
                }
            }
            if self.duplicate {
                registry.register("fold", |w: &Numbers| w.0.len())?;
            }
            Ok(())
        }
    }

    /// Panics or rejects its settings before any variant is registered.
    struct UnbuildableScenario {
        panics: bool,
    }

    impl ScenarioMeta for UnbuildableScenario {
        fn name(&self) -> &'static str {
            "unbuildable"
        }

        fn title(&self) -> &'static str {
            "Workload that cannot be built"
        }
    }

    impl Scenario for UnbuildableScenario {
        type Workload = Numbers;

        fn build(&self, _config: &HarnessConfig) -> Result<Numbers> {
            if self.panics {
                panic!("workload exploded");
            }
            Err(BenchError::configuration("collection-size must be at least 1"))
        }

        fn register(&self, registry: &mut VariantRegistry<Numbers>) -> Result<()> {
            registry.register("len", |w: &Numbers| w.0.len())
        }
    }

    fn small_config() -> HarnessConfig {
        HarnessConfig {
            collection_size: 256,
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn test_measures_every_variant_in_order() {
        let runner = ScenarioRunner::new(small_config());
        let result = runner.run(&SumScenario::default()).unwrap();

        let names: Vec<_> = result.samples.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["fold", "iter-sum", "closed-form"]);
        assert_eq!(result.baseline.as_deref(), Some("fold"));
        assert_eq!(result.repetitions, 20);
        assert_eq!(result.workload, "256 numbers");
        assert!(
            result
                .samples
                .iter()
                .all(|(_, s)| s.as_ref().map(|s| s.repetitions == 20).unwrap_or(false))
        );
        assert_eq!(result.ratio("fold"), Some(Ratio::Speedup(1.0)));
    }

    #[test]
    fn test_failing_variant_does_not_stop_siblings() {
        let runner = ScenarioRunner::new(small_config());
        let scenario = SumScenario {
            broken: vec!["iter-sum"],
            ..Default::default()
        };
        let result = runner.run(&scenario).unwrap();

        assert!(result.sample("fold").unwrap().is_ok());
        let err = result.sample("iter-sum").unwrap().as_ref().unwrap_err();
        assert_eq!(err.completed_calls, 0);
        assert!(err.cause.contains("broken on purpose"));
        assert!(result.sample("closed-form").unwrap().is_ok());
        assert!(!result.is_failed());
        assert!(result.ratio("iter-sum").is_none());

        let report = scenario.execute(&runner);
        assert!(report.row("iter-sum").unwrap().failed);
        assert!(!report.row("closed-form").unwrap().failed);
    }

    #[test]
    fn test_all_failed_reports_scenario_failure() {
        let runner = ScenarioRunner::new(small_config());
        let scenario = SumScenario {
            broken: vec!["fold", "iter-sum", "closed-form"],
            ..Default::default()
        };
        let result = runner.run(&scenario).unwrap();
        assert_eq!(result.failure(), Some(&ScenarioFailure::AllVariantsFailed { count: 3 }));

        let report = runner.execute(&scenario);
        assert!(report.is_failed());
        assert!(report.to_string().contains("scenario failed: all 3 variants failed"));
    }

    #[test]
    fn test_failed_baseline_reports_scenario_failure() {
        let runner = ScenarioRunner::new(small_config());
        let scenario = SumScenario {
            broken: vec!["fold"],
            ..Default::default()
        };
        let report = runner.execute(&scenario);
        assert!(report.is_failed());
        assert!(report.to_string().contains("baseline 'fold' failed"));
    }

    #[test]
    fn test_duplicate_registration_fails_only_that_scenario() {
        let runner = ScenarioRunner::new(small_config());
        let scenario = SumScenario {
            duplicate: true,
            ..Default::default()
        };
        assert!(runner.run(&scenario).unwrap_err().is_configuration());

        let catalog: Vec<Box<dyn DynScenario>> = vec![Box::new(scenario), Box::new(SumScenario::default())];
        let reports = runner.run_all(&catalog);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_failed());
        assert!(reports[0].to_string().contains("duplicate variant name 'fold'"));
        assert!(!reports[1].is_failed());
        assert_eq!(reports[1].rows().len(), 3);
    }

    #[test]
    fn test_zero_repetitions_fails_the_scenario() {
        let config = HarnessConfig {
            repetitions: Some(0),
            ..small_config()
        };
        let runner = ScenarioRunner::new(config);
        assert!(runner.run(&SumScenario::default()).unwrap_err().is_configuration());
        assert!(runner.execute(&SumScenario::default()).is_failed());
    }

    #[test]
    fn test_empty_registry_is_configuration_error() {
        let runner = ScenarioRunner::new(small_config());
        let scenario = SumScenario {
            empty: true,
            ..Default::default()
        };
        let err = runner.run(&scenario).unwrap_err();
        assert!(err.to_string().contains("registered no variants"));
    }

    #[test]
    fn test_config_can_override_baseline_and_repetitions() {
        let mut config = small_config();
        config.scenarios.insert(
            "sum".to_string(),
            ScenarioOverride {
                repetitions: Some(3),
                baseline: Some("closed-form".to_string()),
            },
        );
        let result = ScenarioRunner::new(config).run(&SumScenario::default()).unwrap();
        assert_eq!(result.repetitions, 3);
        assert_eq!(result.baseline.as_deref(), Some("closed-form"));
        assert_eq!(result.ratio("closed-form"), Some(Ratio::Speedup(1.0)));
    }

    #[test]
    fn test_variant_names_come_from_registration() {
        let names = SumScenario::default().variant_names().unwrap();
        assert_eq!(names, vec!["fold", "iter-sum", "closed-form"]);
        assert!(SumScenario { duplicate: true, ..Default::default() }.variant_names().is_err());
    }

    #[test]
    fn test_panicking_build_does_not_drop_later_scenarios() {
        let runner = ScenarioRunner::new(small_config());
        let catalog: Vec<Box<dyn DynScenario>> = vec![
            Box::new(UnbuildableScenario { panics: true }),
            Box::new(SumScenario::default()),
        ];
        let reports = runner.run_all(&catalog);

        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_failed());
        assert!(
            reports[0]
                .to_string()
                .contains("scenario failed: panicked: workload exploded")
        );
        assert_eq!(reports[1].scenario, "sum");
        assert!(!reports[1].is_failed());
        assert_eq!(reports[1].rows().len(), 3);
    }

    #[test]
    fn test_build_error_is_configuration_failure() {
        let runner = ScenarioRunner::new(small_config());
        let scenario = UnbuildableScenario { panics: false };
        assert!(runner.run(&scenario).unwrap_err().is_configuration());

        let report = runner.execute(&scenario);
        assert!(report.is_failed());
        assert!(report.to_string().contains("collection-size must be at least 1"));
    }
}
