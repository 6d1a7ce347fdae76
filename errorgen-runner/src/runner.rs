//! Run orchestration: wires together site lookup, distribution, sampler and
//! aggregator.
//!
//! Three entry points:
//! - `generate()`: one code→weight map, one caller-owned generator. No I/O.
//! - `run_site()`: looks a site up in the dictionary and samples it with the
//!   site's generator from the RNG hierarchy. Used by the CLI.
//! - `run_all_sites()`: samples every site in the dictionary in parallel, each
//!   with its own generator and its own counts.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use errorgen_core::{
    AggregatedCounts, Aggregator, CodeClass, CodeWeightMap, DistributionError, RngHierarchy,
    Sampler, SiteDictionary, SiteError, WeightedDistribution,
};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Site(#[from] SiteError),
    #[error("invalid distribution for site '{site}': {source}")]
    Distribution {
        site: String,
        #[source]
        source: DistributionError,
    },
}

/// Result of sampling one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRun {
    pub site: String,
    /// Seed of the generator this site was sampled with.
    pub seed: u64,
    pub counts: AggregatedCounts,
}

/// Draw `draws` codes from `codes` and aggregate them.
///
/// The distribution is validated before the first draw, so an invalid map
/// never produces partial counts.
pub fn generate<R: Rng>(
    codes: &CodeWeightMap,
    draws: u64,
    rng: R,
) -> Result<AggregatedCounts, DistributionError> {
    let distribution = WeightedDistribution::from_map(codes)?;
    debug!(
        codes = distribution.len(),
        total_weight = distribution.total_weight(),
        "distribution built"
    );

    let mut sampler = Sampler::new(&distribution, rng);
    let mut aggregator = Aggregator::new();
    for (i, drawn) in sampler.take_draws(draws).enumerate() {
        if let CodeClass::NonNumeric(token) = &drawn.class {
            warn!(draw = i, "'{}' is not a valid integer error code", token);
        }
        aggregator.record(&drawn);
    }
    Ok(aggregator.finish())
}

/// Sample a single site from the dictionary.
pub fn run_site(
    dictionary: &SiteDictionary,
    site: &str,
    draws: u64,
    hierarchy: &RngHierarchy,
) -> Result<SiteRun, RunError> {
    let codes = dictionary.site(site)?;
    let seed = hierarchy.sub_seed(site);
    info!(site, draws, seed, "sampling site");

    let counts = generate(codes, draws, hierarchy.rng_for(site)).map_err(|source| {
        RunError::Distribution {
            site: site.to_string(),
            source,
        }
    })?;

    info!(
        site,
        numeric = counts.numeric_draws(),
        non_numeric = counts.non_numeric_draws(),
        "site sampled"
    );
    Ok(SiteRun {
        site: site.to_string(),
        seed,
        counts,
    })
}

/// Sample every site in the dictionary.
///
/// Sites run in parallel; results come back in ascending site order. Each
/// site's counts are identical to what `run_site` produces for it alone. All
/// distributions are validated before any site draws, so a single invalid
/// site fails the whole run with no counts produced.
pub fn run_all_sites(
    dictionary: &SiteDictionary,
    draws: u64,
    hierarchy: &RngHierarchy,
) -> Result<Vec<SiteRun>, RunError> {
    for site in dictionary.site_names() {
        let codes = dictionary.site(site)?;
        WeightedDistribution::from_map(codes).map_err(|source| RunError::Distribution {
            site: site.to_string(),
            source,
        })?;
    }

    let sites: Vec<&str> = dictionary.site_names().collect();
    info!(sites = sites.len(), draws, "sampling all sites");

    sites
        .par_iter()
        .map(|site| run_site(dictionary, site, draws, hierarchy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dictionary() -> SiteDictionary {
        SiteDictionary::from_json_str(
            r#"{
                "Y": { "404": 50, "500": 30, "403": 20 },
                "Z": { "1201": 3, "lost_heartbeat": 1 },
                "SOLO": { "7": 0, "8": 5 }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn generate_counts_every_draw() {
        let dict = dictionary();
        let counts = generate(dict.site("Y").unwrap(), 1000, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(counts.total_draws, 1000);
        assert_eq!(counts.numeric_draws(), 1000);
        assert!(counts.non_numeric.is_empty());
    }

    #[test]
    fn zero_draws_produce_empty_counts() {
        let dict = dictionary();
        let counts = generate(dict.site("Y").unwrap(), 0, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(counts, AggregatedCounts::default());
    }

    #[test]
    fn invalid_map_fails_before_drawing() {
        let map: CodeWeightMap = [("1".to_string(), 0)].into_iter().collect();
        let err = generate(&map, 10, StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, DistributionError::Empty);
    }

    #[test]
    fn unknown_site_is_site_not_found() {
        let err = run_site(&dictionary(), "X", 10, &RngHierarchy::new(1)).unwrap_err();
        assert!(matches!(
            err,
            RunError::Site(SiteError::SiteNotFound { ref site, .. }) if site == "X"
        ));
    }

    #[test]
    fn run_site_is_reproducible() {
        let dict = dictionary();
        let h = RngHierarchy::new(42);
        let a = run_site(&dict, "Y", 500, &h).unwrap();
        let b = run_site(&dict, "Y", 500, &h).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, h.sub_seed("Y"));
    }

    #[test]
    fn non_numeric_tokens_are_separated() {
        let dict = dictionary();
        let run = run_site(&dict, "Z", 2000, &RngHierarchy::new(3)).unwrap();
        assert!(run.counts.count(1201) > 0);
        assert!(run.counts.non_numeric_draws() > 0);
        assert!(run.counts.non_numeric.iter().all(|t| t == "lost_heartbeat"));
        assert_eq!(
            run.counts.count(1201) + run.counts.non_numeric_draws(),
            2000
        );
    }

    #[test]
    fn all_sites_match_individual_runs() {
        let dict = dictionary();
        let h = RngHierarchy::new(11);
        let all = run_all_sites(&dict, 300, &h).unwrap();

        let names: Vec<&str> = all.iter().map(|r| r.site.as_str()).collect();
        assert_eq!(names, vec!["SOLO", "Y", "Z"]);
        for run in &all {
            assert_eq!(run, &run_site(&dict, &run.site, 300, &h).unwrap());
        }
    }

    #[test]
    fn all_sites_fail_on_one_invalid_site() {
        let mut dict = dictionary();
        dict.insert("BROKEN", [("1".to_string(), -1)].into_iter().collect());
        let err = run_all_sites(&dict, 10, &RngHierarchy::new(1)).unwrap_err();
        assert!(matches!(err, RunError::Distribution { ref site, .. } if site == "BROKEN"));
    }

    #[test]
    fn lone_positive_site_always_returns_its_code() {
        let run = run_site(&dictionary(), "SOLO", 250, &RngHierarchy::new(8)).unwrap();
        assert_eq!(run.counts.count(8), 250);
        assert_eq!(run.counts.count(7), 0);
    }
}
