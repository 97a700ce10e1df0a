//! Recommend command implementation.

use crate::cli::RecommendArgs;
use crate::error::Result;
use crate::output::Formatter;
use setlist_engine::{EngineConfig, RecommendationEngine, SeedSet};
use setlist_store::RuleStore;

/// Execute the recommend command.
pub fn execute_recommend(args: RecommendArgs, store: &RuleStore, formatter: &Formatter) -> Result<String> {
    let engine = RecommendationEngine::new(EngineConfig {
        exclude_seed_items: args.exclude_seeds,
        max_top_n: args.top_n.max(EngineConfig::default().max_top_n),
        ..EngineConfig::default()
    });

    let seeds: SeedSet = args.seeds.into_iter().collect();
    let scored = engine.recommend_scored(store, &seeds, args.top_n);

    formatter.format_recommendations(&scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use setlist_store::RuleRecord;

    fn store() -> RuleStore {
        let records = [
            (vec!["A"], vec!["B"], 0.8),
            (vec!["A", "C"], vec!["D"], 0.9),
        ];
        RuleStore::from_rules(
            records
                .into_iter()
                .map(|(ante, cons, confidence)| {
                    RuleRecord {
                        antecedents: ante.into_iter().map(String::from).collect(),
                        consequents: cons.into_iter().map(String::from).collect(),
                        confidence,
                        support: None,
                        lift: None,
                    }
                    .into_rule()
                    .unwrap()
                })
                .collect(),
        )
    }

    #[test]
    fn test_recommend_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = RecommendArgs {
            seeds: vec!["C".into(), "A".into()],
            top_n: 5,
            exclude_seeds: false,
        };
        assert_eq!(execute_recommend(args, &store(), &formatter).unwrap(), "D\nB");
    }

    #[test]
    fn test_recommend_large_top_n_is_honored() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = RecommendArgs {
            seeds: vec!["A".into()],
            top_n: 1_000,
            exclude_seeds: false,
        };
        assert_eq!(execute_recommend(args, &store(), &formatter).unwrap(), "B");
    }
}
