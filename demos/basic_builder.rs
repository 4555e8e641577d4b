use std::env;

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::listener::DiscardLogger;
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

fn main() -> Result<(), evictkit::ConfigError> {
    init_tracing();

    // cargo run --example basic_builder -- mru
    let policy: CachePolicy = env::args().nth(1).as_deref().unwrap_or("lru").parse()?;
    let mut cache = CacheBuilder::default().try_build::<&str, u32>(policy)?;
    cache.set_listener(DiscardLogger);

    for (i, key) in ["A", "B", "C", "D", "E", "F"].into_iter().enumerate() {
        cache.put(key, i as u32);
        if i == 2 {
            cache.get(&"A");
        }
    }

    println!("policy: {policy}");
    print!("{}", cache.render());
    Ok(())
}
