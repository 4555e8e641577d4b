//! Index-linked building blocks shared by the recency policies.

pub mod intrusive_list;
pub mod slot_arena;

pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
