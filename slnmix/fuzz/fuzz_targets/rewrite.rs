#![no_main]
use libfuzzer_sys::fuzz_target;
use slnmix::api::Layout;

fuzz_target!(|data: &str| {
    let (once, _) = slnmix::rewrite_str(data, Layout::MixedPlatforms);
    // Declarations inside regenerated sections disappear after the first pass
    if slnmix::projects(&once) == slnmix::projects(data) {
        let (twice, _) = slnmix::rewrite_str(&once, Layout::MixedPlatforms);
        assert_eq!(once, twice);
    }
});
