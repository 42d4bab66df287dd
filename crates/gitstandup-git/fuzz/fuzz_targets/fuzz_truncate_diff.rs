#![no_main]

use gitstandup_git::truncate_diff;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, u16)| {
    let (diff, budget) = input;
    let budget = usize::from(budget);
    let out = truncate_diff(diff, budget);

    let total = diff.split('\n').count();
    if total <= budget {
        assert_eq!(out, diff);
    } else {
        assert_eq!(out.split('\n').count(), 2 * (budget / 2) + 1);
    }
});
