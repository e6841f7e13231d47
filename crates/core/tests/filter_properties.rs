use insightboard_core::{build_filter, FilterQuery};
use proptest::prelude::*;

fn raw_param() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        any::<String>().prop_map(Some),
        "[0-9a-z ,.\\-]{0,32}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn builder_tolerates_arbitrary_parameters(
        topic in raw_param(),
        sector in raw_param(),
        region in raw_param(),
        pestle in raw_param(),
        source in raw_param(),
        country in raw_param(),
        end_year in raw_param(),
        intensity_min in raw_param(),
        intensity_max in raw_param(),
        likelihood_min in raw_param(),
        likelihood_max in raw_param(),
        relevance_min in raw_param(),
        relevance_max in raw_param(),
        impact_min in raw_param(),
        impact_max in raw_param(),
    ) {
        let query = FilterQuery {
            topic,
            sector,
            region,
            pestle,
            source,
            country,
            end_year,
            intensity_min,
            intensity_max,
            likelihood_min,
            likelihood_max,
            relevance_min,
            relevance_max,
            impact_min,
            impact_max,
        };
        let filter = build_filter(&query);
        prop_assert_eq!(&build_filter(&query), &filter);

        let memberships = [
            &filter.topic,
            &filter.sector,
            &filter.region,
            &filter.pestle,
            &filter.source,
            &filter.country,
        ];
        for clause in memberships {
            if let Some(values) = clause {
                prop_assert!(!values.is_empty());
                for value in values {
                    prop_assert!(!value.is_empty());
                    prop_assert_eq!(value.trim(), value.as_str());
                }
            }
        }

        let ranges = [filter.intensity, filter.likelihood, filter.relevance, filter.impact];
        for range in ranges.into_iter().flatten() {
            prop_assert!(range.min.is_some() || range.max.is_some());
            for bound in [range.min, range.max].into_iter().flatten() {
                prop_assert!(bound.is_finite());
            }
        }

        if let Some(year) = filter.end_year {
            prop_assert!(year.is_finite());
        }
    }
}
