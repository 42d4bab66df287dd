#![no_main]

//! Fuzz target for repository list updates
//!
//! Arbitrary add/remove sequences must keep the list free of duplicates.

use libfuzzer_sys::fuzz_target;

use gitstandup_mcp::store::RepoConfig;

fuzz_target!(|ops: Vec<(bool, Vec<String>)>| {
    let mut config = RepoConfig::default();

    for (add, paths) in ops {
        if add {
            config.add(paths);
        } else {
            let removed = config.remove(paths.clone());
            assert!(removed.iter().all(|p| !config.repos.contains(p)));
        }

        let mut sorted = config.repos.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), config.repos.len());
    }
});
