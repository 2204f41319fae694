//! Registration code - single-use six digit invitation to create an account

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::value_objects::Snowflake;

/// Number of digits in every code
pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationCode {
    pub id: Snowflake,
    pub code: String,
    pub is_used: bool,
    pub used_by_user_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl RegistrationCode {
    pub fn new(id: Snowflake, code: String) -> Self {
        Self {
            id,
            code,
            is_used: false,
            used_by_user_id: None,
            created_at: Utc::now(),
        }
    }

    /// Random code of exactly six ASCII digits (leading zeros allowed)
    pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
        (0..CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    pub fn is_valid_format(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn mark_used(&mut self, user_id: Snowflake) {
        self.is_used = true;
        self.used_by_user_id = Some(user_id);
    }

    pub fn reset(&mut self) {
        self.is_used = false;
        self.used_by_user_id = None;
    }
}
