//! Shared utility functions for shop-cloud

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Epoch millis at today's midnight (UTC)
pub fn start_of_day_millis() -> i64 {
    use chrono::{TimeZone, Utc};
    let now = Utc::now();
    Utc.from_utc_datetime(&now.date_naive().and_hms_opt(0, 0, 0).expect("midnight is valid"))
        .timestamp_millis()
}

/// Epoch millis at the first day of the current month (UTC)
pub fn start_of_month_millis() -> i64 {
    use chrono::{Datelike, TimeZone, Utc};
    let now = Utc::now();
    let first = now
        .date_naive()
        .with_day(1)
        .expect("day 1 exists in every month");
    Utc.from_utc_datetime(&first.and_hms_opt(0, 0, 0).expect("midnight is valid"))
        .timestamp_millis()
}

/// Epoch millis exactly `days` days ago
pub fn days_ago_millis(days: i64) -> i64 {
    now_millis() - days * 24 * 60 * 60 * 1000
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Generate a collision-resistant order number: `ORD-<ts36>-<rand6>`.
///
/// The timestamp part makes numbers roughly sortable by creation time;
/// the random suffix disambiguates orders created in the same millisecond.
pub fn generate_order_number() -> String {
    use rand::Rng;
    use rand::distributions::Alphanumeric;

    let ts = to_base36(now_millis() as u64);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("ORD-{ts}-{suffix}").to_uppercase()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

/// Derive a URL slug from a display name: lowercase, non-alphanumeric runs
/// collapse to single hyphens.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_hyphen = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            out.push('-');
            last_was_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
    }

    #[test]
    fn test_order_number_format() {
        let n = generate_order_number();
        assert!(n.starts_with("ORD-"));
        let parts: Vec<&str> = n.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].len(), 6);
        assert_eq!(n, n.to_uppercase());
    }

    #[test]
    fn test_order_numbers_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_order_number()));
        }
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }

    #[test]
    fn test_window_starts_precede_now() {
        let now = now_millis();
        assert!(start_of_day_millis() <= now);
        assert!(start_of_month_millis() <= start_of_day_millis());
        assert!(days_ago_millis(7) < now);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Blue Widget"), "blue-widget");
        assert_eq!(slugify("  Café -- 2000!"), "caf-2000");
        assert_eq!(slugify("already-slugged"), "already-slugged");
        assert_eq!(slugify("***"), "");
    }
}
