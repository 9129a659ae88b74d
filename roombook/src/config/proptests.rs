//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..=3600),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(wait, ordered, delete, format, autoinit)| Config {
            maximum_lock_wait_seconds: wait,
            require_ordered_dates: ordered,
            allow_delete_approved: delete,
            output_format: format,
            disable_autoinit: autoinit,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Merging an empty config changes nothing
    #[test]
    fn merge_empty_is_right_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging into an empty config copies the source
    #[test]
    fn merge_into_empty_copies_source(config in config_strategy()) {
        let mut merged = Config::default();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Each field comes from the higher layer when set there
    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(
            merged.require_ordered_dates,
            high.require_ordered_dates.or(low.require_ordered_dates)
        );
        prop_assert_eq!(
            merged.allow_delete_approved,
            high.allow_delete_approved.or(low.allow_delete_approved)
        );
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
    }
}
