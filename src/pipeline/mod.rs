pub mod target;
pub mod writer;

use std::{collections::BTreeSet, fs, path::Path};

use chrono::Utc;

use crate::{
    error::FilterError,
    list::{Corpus, ExclusionList},
    net::{DohResolver, Validator},
    settings::Settings,
};

pub use target::{TargetResult, output_path, process_target};
pub use writer::{Header, write_combined, write_entries};

pub const COMBINED_FILE_NAME: &str = "all_filters.txt";

/// Counts reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub corpus_size: usize,
    pub processed_targets: usize,
    pub failed_targets: usize,
    /// Size of the union of new entries across all targets
    pub new_entries: usize,
    /// Entries written to the combined list (after validation, if any)
    pub combined_entries: usize,
    pub exclusions: usize,
    pub combined_written: bool,
}

/// Accumulated output of the target stage
#[derive(Debug, Default)]
struct Collected {
    union: BTreeSet<String>,
    exclusions: ExclusionList,
    processed: usize,
    failed: usize,
}

/// Run the whole pipeline: corpus, targets, optional validation, combined list
///
/// `validator` is consulted only when the settings select the extended
/// variant; pass `None` for the simple variant.
///
/// # Returns
/// * `Ok(RunSummary)` - At least one target was processed
/// * `Err(FilterError::NoTargetsProcessed)` - Every target failed to load
pub async fn run<R: DohResolver>(
    settings: &Settings,
    validator: Option<&Validator<R>>,
) -> Result<RunSummary, FilterError> {
    let modified = Utc::now();

    let corpus = Corpus::load(&settings.blocklists_dir, settings.variant);
    log::info!("Existing blocklists contain {} rule(s)", corpus.len());

    if let Err(source) = fs::create_dir_all(&settings.output_dir) {
        let err = FilterError::Write {
            path: settings.output_dir.clone(),
            source,
        };
        log::error!("Cannot create output directory: {err}");
    }

    let collected = collect_targets(settings, &corpus);

    let mut summary = RunSummary {
        corpus_size: corpus.len(),
        processed_targets: collected.processed,
        failed_targets: collected.failed,
        new_entries: collected.union.len(),
        exclusions: collected.exclusions.len(),
        ..Default::default()
    };

    if collected.processed == 0 {
        if corpus.is_empty() {
            log::warn!("No usable input: the blocklists directory and every target were empty or unreadable");
        }
        return Err(FilterError::NoTargetsProcessed {
            count: settings.targets.len(),
        });
    }

    let combined = match validator {
        Some(validator) if settings.variant.validates() => {
            validator.validate(&collected.union).await
        }
        _ => collected.union,
    };
    summary.combined_entries = combined.len();

    let combined_path = settings.output_dir.join(COMBINED_FILE_NAME);
    match write_combined(
        &combined_path,
        &settings.header,
        modified,
        &collected.exclusions,
        &combined,
    ) {
        Ok(()) => {
            log::info!(
                "Wrote {} entries to {}",
                combined.len(),
                combined_path.display()
            );
            summary.combined_written = true;
        }
        Err(err) => log::error!("{err}"),
    }

    Ok(summary)
}

fn collect_targets(settings: &Settings, corpus: &Corpus) -> Collected {
    let mut collected = Collected::default();

    for target in &settings.targets {
        log::info!("Processing {}", target.display());
        let result = match process_target(target, corpus, &mut collected.exclusions) {
            Ok(result) => result,
            Err(err) => {
                log::error!("Skipping target: {err}");
                collected.failed += 1;
                continue;
            }
        };
        collected.processed += 1;
        log::info!(
            "{}: {} rule(s), {} new",
            target.display(),
            result.entries.len(),
            result.novel.len()
        );

        write_target(&settings.output_dir, target, &result.novel);
        collected.union.extend(result.novel);
    }

    collected
}

fn write_target(output_dir: &Path, target: &Path, novel: &BTreeSet<String>) {
    let path = output_path(output_dir, target);
    match write_entries(&path, novel) {
        Ok(()) => log::info!("Wrote {} entries to {}", novel.len(), path.display()),
        Err(err) => log::error!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        list::Variant,
        net::{HttpDohResolver, resolver::MockDohResolver},
    };
    use std::{path::PathBuf, sync::Arc, time::Duration};

    struct Fixture {
        _dir: tempfile::TempDir,
        settings: Settings,
    }

    fn fixture(corpus: &[(&str, &str)], targets: &[(&str, &str)]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let lists = dir.path().join("lists");
        fs::create_dir(&lists).unwrap();
        for (name, content) in corpus {
            fs::write(lists.join(name), content).unwrap();
        }
        let mut paths = Vec::new();
        for (name, content) in targets {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            paths.push(path);
        }

        let mut settings = Settings::with_targets(paths);
        settings.blocklists_dir = lists;
        settings.output_dir = dir.path().join("out");
        Fixture {
            _dir: dir,
            settings,
        }
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    /// Combined list without its header block
    fn combined_body(settings: &Settings) -> String {
        let content = read(settings.output_dir.join(COMBINED_FILE_NAME));
        let (_, body) = content.split_once("\n\n").unwrap();
        body.to_string()
    }

    #[tokio::test]
    async fn test_simple_scenario() {
        let fx = fixture(
            &[("existing.txt", "a.com\n#comment\nb.com\n")],
            &[("target.txt", "a.com\nc.com\n@@allow.com\n")],
        );

        let summary = run::<HttpDohResolver>(&fx.settings, None).await.unwrap();

        assert_eq!(summary.corpus_size, 2);
        assert_eq!(summary.processed_targets, 1);
        assert_eq!(summary.new_entries, 1);
        assert!(summary.combined_written);
        assert_eq!(read(fx.settings.output_dir.join("target_filters.txt")), "c.com\n");
        assert_eq!(combined_body(&fx.settings), "@@allow.com\n\nc.com\n");
    }

    #[tokio::test]
    async fn test_shared_entry_written_once() {
        let fx = fixture(
            &[("existing.txt", "old.com\n")],
            &[
                ("first.txt", "shared.com\nold.com\nfirst.com\n"),
                ("second.txt", "shared.com\n"),
            ],
        );

        let summary = run::<HttpDohResolver>(&fx.settings, None).await.unwrap();

        assert_eq!(summary.new_entries, 2);
        assert_eq!(
            read(fx.settings.output_dir.join("first_filters.txt")),
            "first.com\nshared.com\n"
        );
        assert_eq!(read(fx.settings.output_dir.join("second_filters.txt")), "shared.com\n");
        assert_eq!(combined_body(&fx.settings), "first.com\nshared.com\n");
    }

    #[tokio::test]
    async fn test_exclusions_keep_first_seen_order_across_targets() {
        let fx = fixture(
            &[],
            &[
                ("first.txt", "@@z.com\n@@a.com\n"),
                ("second.txt", "@@m.com\n@@z.com\nx.com\n"),
            ],
        );

        let summary = run::<HttpDohResolver>(&fx.settings, None).await.unwrap();

        assert_eq!(summary.exclusions, 3);
        assert_eq!(
            combined_body(&fx.settings),
            "@@z.com\n@@a.com\n@@m.com\n\nx.com\n"
        );
    }

    #[tokio::test]
    async fn test_missing_target_is_skipped() {
        let mut fx = fixture(&[], &[("present.txt", "p.com\n")]);
        let missing = fx.settings.output_dir.with_file_name("missing.txt");
        fx.settings.targets.insert(0, missing);

        let summary = run::<HttpDohResolver>(&fx.settings, None).await.unwrap();

        assert_eq!(summary.processed_targets, 1);
        assert_eq!(summary.failed_targets, 1);
        assert!(!fx.settings.output_dir.join("missing_filters.txt").exists());
        assert_eq!(combined_body(&fx.settings), "p.com\n");
    }

    #[tokio::test]
    async fn test_no_processed_targets_is_an_error() {
        let mut fx = fixture(&[], &[]);
        fx.settings.targets = vec![fx.settings.output_dir.with_file_name("missing.txt")];

        let result = run::<HttpDohResolver>(&fx.settings, None).await;

        assert!(matches!(
            result,
            Err(FilterError::NoTargetsProcessed { count: 1 })
        ));
        assert!(!fx.settings.output_dir.join(COMBINED_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_extended_variant_validates_and_skips_corpus_exclusions() {
        let mut fx = fixture(
            &[("existing.txt", "@@good.example\nold.example\n")],
            &[(
                "target.txt",
                "old.example\ngood.example\nbad.example\n@@keep.example\n",
            )],
        );
        fx.settings.variant = Variant::Extended;

        let mut resolver = MockDohResolver::new();
        resolver
            .expect_query_status()
            .returning(|domain| Ok(if domain == "good.example" { 0 } else { 2 }));
        let validator = Validator::new(Arc::new(resolver), Duration::from_secs(1), 1);

        let summary = run(&fx.settings, Some(&validator)).await.unwrap();

        assert_eq!(summary.corpus_size, 1);
        assert_eq!(summary.new_entries, 2);
        assert_eq!(summary.combined_entries, 1);
        // Per-target output is written before validation
        assert_eq!(
            read(fx.settings.output_dir.join("target_filters.txt")),
            "bad.example\ngood.example\n"
        );
        assert_eq!(
            combined_body(&fx.settings),
            "@@keep.example\n\ngood.example\n"
        );
    }

    #[tokio::test]
    async fn test_blocked_target_output_does_not_stop_other_outputs() {
        let fx = fixture(&[], &[("a.txt", "x.com\n"), ("b.txt", "y.com\n")]);
        fs::create_dir_all(fx.settings.output_dir.join("a_filters.txt")).unwrap();

        let summary = run::<HttpDohResolver>(&fx.settings, None).await.unwrap();

        assert_eq!(summary.processed_targets, 2);
        assert!(summary.combined_written);
        assert!(fx.settings.output_dir.join("a_filters.txt").is_dir());
        assert_eq!(read(fx.settings.output_dir.join("b_filters.txt")), "y.com\n");
        assert_eq!(combined_body(&fx.settings), "x.com\ny.com\n");
    }

    #[tokio::test]
    async fn test_blocked_combined_output_keeps_target_outputs() {
        let fx = fixture(&[], &[("a.txt", "x.com\n")]);
        fs::create_dir_all(fx.settings.output_dir.join(COMBINED_FILE_NAME)).unwrap();

        let summary = run::<HttpDohResolver>(&fx.settings, None).await.unwrap();

        assert!(!summary.combined_written);
        assert_eq!(read(fx.settings.output_dir.join("a_filters.txt")), "x.com\n");
    }

    #[tokio::test]
    async fn test_extended_variant_without_exclusions_has_single_separator() {
        let mut fx = fixture(&[], &[("target.txt", "good.example\n")]);
        fx.settings.variant = Variant::Extended;

        let mut resolver = MockDohResolver::new();
        resolver.expect_query_status().returning(|_| Ok(0));
        let validator = Validator::new(Arc::new(resolver), Duration::from_secs(1), 1);

        run(&fx.settings, Some(&validator)).await.unwrap();

        let content = read(fx.settings.output_dir.join(COMBINED_FILE_NAME));
        assert!(content.ends_with("Z\n\ngood.example\n"));
        assert!(!content.contains("\n\n\n"));
    }

    #[tokio::test]
    async fn test_simple_variant_ignores_validator() {
        let fx = fixture(&[], &[("target.txt", "x.example\n")]);

        let mut resolver = MockDohResolver::new();
        resolver.expect_query_status().never();
        let validator = Validator::new(Arc::new(resolver), Duration::from_secs(1), 1);

        let summary = run(&fx.settings, Some(&validator)).await.unwrap();

        assert_eq!(summary.combined_entries, 1);
    }

    #[tokio::test]
    async fn test_rerun_is_identical_apart_from_timestamp() {
        let fx = fixture(
            &[("existing.txt", "a.com\n")],
            &[("target.txt", "b.com\n@@c.com\na.com\nd.com\n")],
        );

        run::<HttpDohResolver>(&fx.settings, None).await.unwrap();
        let first_target = read(fx.settings.output_dir.join("target_filters.txt"));
        let first_combined = combined_body(&fx.settings);

        run::<HttpDohResolver>(&fx.settings, None).await.unwrap();

        assert_eq!(read(fx.settings.output_dir.join("target_filters.txt")), first_target);
        assert_eq!(combined_body(&fx.settings), first_combined);
    }
}
