//! Identifiers and checksums in the forms Anki expects.

use rand::Rng;
use regex::Regex;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

const BASE91_TABLE: &[u8; 91] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&()*+,-./:;<=>?@[]^_`{|}~";

/// Random deck or model id in `[2^30, 2^31)`.
pub fn random_id() -> i64 {
    rand::thread_rng().gen_range((1_i64 << 30)..(1_i64 << 31))
}

/// Stable note GUID derived from the note's field values.
pub fn guid_for(fields: &[&str]) -> String {
    let digest = Sha256::digest(fields.join("__").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    base91(u64::from_be_bytes(bytes))
}

/// Duplicate-detection checksum of a note's first field.
pub fn field_checksum(field: &str) -> i64 {
    let digest = Sha1::digest(strip_html(field).as_bytes());
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&digest[..4]);
    i64::from(u32::from_be_bytes(bytes))
}

fn base91(mut n: u64) -> String {
    let mut out = Vec::new();
    while n > 0 {
        out.push(BASE91_TABLE[(n % 91) as usize]);
        n /= 91;
    }
    if out.is_empty() {
        out.push(BASE91_TABLE[0]);
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn strip_html(text: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let tags = TAGS.get_or_init(|| Regex::new(r"(?s)<.*?>").expect("valid tag pattern"));

    tags.replace_all(text, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
