#[macro_use]
mod macros;

use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;

pub(crate) const OBJECT_ID_LEN: usize = 12;

const COUNTER_MASK: u32 = 0x00ff_ffff;

// Seeded in the lower half so a process needs millions of ids before the
// counter wraps.
const COUNTER_SEED_MASK: u32 = 0x007f_ffff;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::random());

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::random::<u32>() & COUNTER_SEED_MASK));

/// Object identifier layout: 4 bytes of big-endian unix seconds, 5 bytes
/// fixed per process, 3 bytes of a wrapping big-endian counter.
pub(crate) fn generate_object_id() -> [u8; OBJECT_ID_LEN] {
    let timestamp = (chrono::Utc::now().timestamp() as u32).to_be_bytes();
    let counter = (COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK).to_be_bytes();

    let mut bytes = [0u8; OBJECT_ID_LEN];
    bytes[..4].copy_from_slice(&timestamp);
    bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
    bytes[9..].copy_from_slice(&counter[1..]);
    bytes
}

define_object_id!(TodoId);
