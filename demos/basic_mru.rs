use evictkit::listener::DiscardLogger;
use evictkit::policy::mru::MruCache;
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

    let mut cache: MruCache<u32, &str> = MruCache::with_listener(3, DiscardLogger);
    cache.put(1, "page-1");
    cache.put(2, "page-2");
    cache.put(3, "page-3");

    // A sequential scan re-reads page 1; MRU gives that slot up first.
    cache.get(&1);
    cache.put(4, "page-4");

    println!("contains 1? {}", cache.contains(&1));
    print!("{}", cache.render());
}

// Expected output:
//  INFO DISCARD: 1
// contains 1? false
// Current cache:
// 4: page-4
// 3: page-3
// 2: page-2
