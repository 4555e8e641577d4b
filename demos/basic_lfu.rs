use evictkit::listener::DiscardLogger;
use evictkit::policy::lfu::LfuCache;
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

    let mut cache = LfuCache::with_listener(2, DiscardLogger);
    cache.put("A", 1);
    cache.put("B", 2);
    cache.get(&"A");
    cache.get(&"A");

    println!("freq A = {:?}, freq B = {:?}", cache.frequency(&"A"), cache.frequency(&"B"));

    cache.put("C", 3);
    print!("{}", cache.render());
}

// Expected output:
// freq A = Some(3), freq B = Some(1)
//  INFO DISCARD: B
// Current cache:
// C: 3
// A: 1
//
// show/render list entries next-victim first.
