use evictkit::listener::DiscardLogger;
use evictkit::policy::fifo::FifoCache;
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

    let mut cache = FifoCache::with_listener(4, DiscardLogger);
    cache.put("A", "Hello");
    cache.put("B", "World");
    cache.put("C", "Holberton");
    cache.put("D", "School");
    print!("{}", cache.render());

    cache.put("E", "Battery");
    print!("{}", cache.render());

    cache.put("C", "Street");
    cache.put("F", "Mission");
    print!("{}", cache.render());
}

// Expected output:
// Current cache:
// A: Hello
// B: World
// C: Holberton
// D: School
//  INFO DISCARD: A
// Current cache:
// B: World
// C: Holberton
// D: School
// E: Battery
//  INFO DISCARD: B
// Current cache:
// C: Street
// D: School
// E: Battery
// F: Mission
