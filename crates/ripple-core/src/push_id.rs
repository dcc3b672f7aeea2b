//! Chronologically sortable record keys in the Firebase push-id format:
//! 8 characters of millisecond timestamp followed by 12 random characters,
//! all from an alphabet whose ASCII order matches its digit order.

use crate::ripple::RippleId;
use rand::Rng;

const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const TIME_CHARS: usize = 8;
const RANDOM_CHARS: usize = 12;
pub const PUSH_ID_LEN: usize = TIME_CHARS + RANDOM_CHARS;

pub struct PushIdGenerator<R> {
    rng: R,
    last_ms: i64,
    last_random: [u8; RANDOM_CHARS],
}

impl<R: Rng> PushIdGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            last_ms: i64::MIN,
            last_random: [0; RANDOM_CHARS],
        }
    }

    /// Keys from one generator are strictly increasing, also within a single
    /// millisecond and when the clock steps backwards.
    pub fn next_id(&mut self, now_ms: i64) -> RippleId {
        let now = now_ms.max(self.last_ms).max(0);
        if now == self.last_ms {
            self.increment_random();
        } else {
            for slot in self.last_random.iter_mut() {
                *slot = self.rng.gen_range(0..64);
            }
        }
        self.last_ms = now;

        let mut out = [0u8; PUSH_ID_LEN];
        let mut t = now as u64;
        for slot in out[..TIME_CHARS].iter_mut().rev() {
            *slot = PUSH_CHARS[(t % 64) as usize];
            t /= 64;
        }
        for (slot, r) in out[TIME_CHARS..].iter_mut().zip(self.last_random.iter()) {
            *slot = PUSH_CHARS[*r as usize];
        }
        RippleId::new(out.iter().map(|b| *b as char).collect::<String>())
    }

    fn increment_random(&mut self) {
        for slot in self.last_random.iter_mut().rev() {
            if *slot == 63 {
                *slot = 0;
            } else {
                *slot += 1;
                return;
            }
        }
    }
}

/// Millisecond timestamp encoded in a push id, if it looks like one.
pub fn push_id_timestamp(id: &RippleId) -> Option<i64> {
    let bytes = id.as_str().as_bytes();
    if bytes.len() != PUSH_ID_LEN {
        return None;
    }
    let mut t: i64 = 0;
    for b in &bytes[..TIME_CHARS] {
        let digit = PUSH_CHARS.iter().position(|c| c == b)?;
        t = t * 64 + digit as i64;
    }
    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn alphabet_is_ascii_sorted() {
        assert!(PUSH_CHARS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn same_millisecond_ids_increase() {
        let mut gen = PushIdGenerator::new(StdRng::seed_from_u64(7));
        let a = gen.next_id(1_700_000_000_000);
        let b = gen.next_id(1_700_000_000_000);
        let c = gen.next_id(1_699_999_999_000);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn timestamp_round_trips() {
        let mut gen = PushIdGenerator::new(StdRng::seed_from_u64(1));
        let id = gen.next_id(1_234_567_890_123);
        assert_eq!(id.as_str().len(), PUSH_ID_LEN);
        assert_eq!(push_id_timestamp(&id), Some(1_234_567_890_123));
    }
}
