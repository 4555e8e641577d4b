use evictkit::listener::DiscardLogger;
use evictkit::policy::lifo::LifoCache;
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

    let mut cache = LifoCache::with_listener(4, DiscardLogger);
    for (key, value) in [("A", "Hello"), ("B", "World"), ("C", "Holberton"), ("D", "School")] {
        cache.put(key, value);
    }

    cache.put("E", "Battery");
    cache.put("C", "Street");
    cache.put("F", "Mission");
    print!("{}", cache.render());

    if let Some((key, _)) = cache.peek_newest() {
        println!("next victim: {key}");
    }
}

// Expected output:
//  INFO DISCARD: D
//  INFO DISCARD: E
// Current cache:
// A: Hello
// B: World
// C: Street
// F: Mission
// next victim: F
