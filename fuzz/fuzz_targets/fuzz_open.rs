#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, OnceLock};
use uptimey::core::path;
use uptimey::{DirFs, EmbeddedFs, FileSystem, Registry};

#[derive(Arbitrary, Debug)]
struct Lookup<'a> {
    prefix: &'a str,
    name: &'a str,
}

fn registry() -> Arc<Registry> {
    static REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| Arc::new(Registry::bundled())).clone()
}

fuzz_target!(|lookup: Lookup| {
    let base = EmbeddedFs::new(registry());
    let proxy = DirFs::new(base.clone(), lookup.prefix);

    let joined = path::join(lookup.prefix, lookup.name);

    // A cleaned name never leaves the prefix
    let root = path::normalize(lookup.prefix);
    let cleaned = path::normalize(&path::join(&root, &path::normalize(lookup.name)));
    assert!(cleaned == root || root == "/" || cleaned.starts_with(&format!("{}/", root)));

    match (proxy.open(lookup.name), base.open(&joined)) {
        (Ok(a), Ok(b)) => assert_eq!(a.bytes(), b.bytes()),
        (Err(a), Err(b)) => assert_eq!(a.is_not_found(), b.is_not_found()),
        (a, b) => panic!("proxy and base disagree on {}: {:?} vs {:?}", joined, a.is_ok(), b.is_ok()),
    }
});
