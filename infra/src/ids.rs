use std::cmp::{self, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{self, AtomicU64};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use data_encoding::BASE64URL_NOPAD;
use hex_slice::AsHex;
use log::*;
use rand::Rng;
use serde::{Serialize, Serializer};

/// An opaque identifier for some `T`. The first eight bytes are a
/// nanosecond timestamp, the remainder random.
pub struct Id<T> {
    val: [u8; 16],
    phantom: PhantomData<T>,
}

pub trait Entity {
    const PREFIX: &'static str;
}

const DIVIDER: &str = "-";

/// Hands out identifiers whose timestamps strictly increase, so no two ids
/// from one generator ever collide.
#[derive(Debug, Default)]
pub struct IdGen {
    last_stamp: AtomicU64,
}

impl IdGen {
    pub fn new() -> Self {
        IdGen::default()
    }

    pub fn generate<T>(&self) -> Id<T> {
        let stamp = self.next_stamp();
        let random: u64 = rand::thread_rng().gen();

        let mut val = [0u8; 16];
        val[..8].copy_from_slice(&stamp.to_be_bytes());
        val[8..].copy_from_slice(&random.to_be_bytes());
        trace!("Generated id with stamp {}", stamp);
        Id {
            val,
            phantom: PhantomData,
        }
    }

    fn next_stamp(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut prev = self.last_stamp.load(atomic::Ordering::Relaxed);
        loop {
            let next = cmp::max(now, prev + 1);
            match self.last_stamp.compare_exchange_weak(
                prev,
                next,
                atomic::Ordering::Relaxed,
                atomic::Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl<T> Id<T> {
    pub fn timestamp(&self) -> SystemTime {
        let mut stamp = [0u8; 8];
        stamp.copy_from_slice(&self.val[..8]);
        UNIX_EPOCH + Duration::from_nanos(u64::from_be_bytes(stamp))
    }

    pub fn random(&self) -> u64 {
        let mut random = [0u8; 8];
        random.copy_from_slice(&self.val[8..]);
        u64::from_be_bytes(random)
    }
}

impl<T: Entity> fmt::Display for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{}{}{}",
            T::PREFIX,
            DIVIDER,
            BASE64URL_NOPAD.encode(&self.val)
        )
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Id")
            .field("val", &format_args!("{:x}", self.val.as_hex()))
            .finish()
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id {
            val: self.val,
            phantom: self.phantom,
        }
    }
}

impl<T> Copy for Id<T> {}

impl<T: Entity> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
