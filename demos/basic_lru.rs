use evictkit::listener::DiscardLogger;
use evictkit::policy::lru::LruCache;
use evictkit::traits::CoreCache;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    init_tracing();

    let mut cache: LruCache<u32, String> = LruCache::with_listener(2, DiscardLogger);
    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {value}");
    }

    cache.put(3, "gamma".to_string());
    println!("contains 2? {}", cache.contains(&2));
    print!("{}", cache.render());
}

// Expected output:
// hit 1: alpha
//  INFO DISCARD: 2
// contains 2? false
// Current cache:
// 3: gamma
// 1: alpha
//
// Explanation: capacity=2; after get(&1), key 1 is most recent and key 2 is
// least recent. Inserting key 3 evicts key 2.
