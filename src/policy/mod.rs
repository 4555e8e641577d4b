//! Replacement policies.
//!
//! | Policy | Victim on overflow                                   | `show` order            |
//! |--------|------------------------------------------------------|-------------------------|
//! | Basic  | none, unbounded                                      | first insertion         |
//! | FIFO   | oldest insertion                                     | oldest → newest         |
//! | LIFO   | newest insertion                                     | oldest → newest         |
//! | LRU    | least recently used                                  | most → least recent     |
//! | MRU    | most recently used                                   | most → least recent     |
//! | LFU    | fewest accesses, oldest last access on ties          | next victim first       |

pub mod basic;
pub mod fifo;
pub mod lfu;
pub mod lifo;
pub mod lru;
pub mod mru;
