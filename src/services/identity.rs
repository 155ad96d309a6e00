//! Room name and participant identity generation.
//!
//! Room names look like `edy-1718000000000-k3x9q0ab` and identities like
//! `user-p81mz0c2`. The eight character suffix mixes random bits from a v4
//! UUID with a process-wide sequence number in its low digits, so two
//! successive calls can never repeat a name even if the random bits collide.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const SUFFIX_LEN: usize = 8;
const SEQUENCE_DIGITS: u32 = 3;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh room name: `{prefix}-{unix_millis}-{suffix}`
pub fn generate_room_name(prefix: &str) -> String {
    format!("{prefix}-{}-{}", Utc::now().timestamp_millis(), unique_suffix())
}

/// Generate a fresh participant identity: `{prefix}-{suffix}`
pub fn generate_participant_identity(prefix: &str) -> String {
    format!("{prefix}-{}", unique_suffix())
}

/// Check that `name` has the shape produced by [`generate_room_name`]
pub fn is_valid_room_name(prefix: &str, name: &str) -> bool {
    let Some(rest) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return false;
    };

    match rest.split_once('-') {
        Some((millis, suffix)) => {
            !millis.is_empty()
                && millis.bytes().all(|b| b.is_ascii_digit())
                && is_valid_suffix(suffix)
        }
        None => false,
    }
}

/// Check that `identity` has the shape produced by [`generate_participant_identity`]
pub fn is_valid_participant_identity(prefix: &str, identity: &str) -> bool {
    identity
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(is_valid_suffix)
}

fn is_valid_suffix(suffix: &str) -> bool {
    suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

fn unique_suffix() -> String {
    let sequence_space = 36u128.pow(SEQUENCE_DIGITS);
    let random_space = 36u128.pow(SUFFIX_LEN as u32 - SEQUENCE_DIGITS);

    let sequence = u128::from(SEQUENCE.fetch_add(1, Ordering::Relaxed)) % sequence_space;
    let random = Uuid::new_v4().as_u128() % random_space;

    encode_base36(random * sequence_space + sequence, SUFFIX_LEN)
}

/// Encode `value` as zero-padded lowercase base 36, keeping the lowest `width` digits
fn encode_base36(mut value: u128, width: usize) -> String {
    let mut digits = vec![b'0'; width];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36_DIGITS[(value % 36) as usize];
        value /= 36;
    }
    digits.into_iter().map(char::from).collect()
}
