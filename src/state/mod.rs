//! Client-side stores, one per domain.
//!
//! DESIGN
//! ======
//! Each store owns plain state behind a `RefCell` and exposes async
//! operations over injected seams (transport, notifier, storage). Borrows
//! are never held across an await, so overlapping operations race
//! last-write-wins instead of panicking. `loading` flags are advisory UI
//! state, not mutual exclusion.

pub mod antennas;
pub mod session;
pub mod uf;
