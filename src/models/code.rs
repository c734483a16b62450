//! Canonical department codes.
//!
//! Datasets disagree on how codes are written: `"1"` vs `"01"`, `"2a"` vs
//! `"2A"`, integers vs strings. Every join goes through
//! [`DepartmentCode::canonical`] on both sides so those spellings meet.
//! Overseas codes (`"971"`…`"976"`) and Corsica (`"2A"`, `"2B"`) are kept as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentCode(String);

impl DepartmentCode {
    /// Normalize a raw code: trim, uppercase, left-pad single digits to two.
    pub fn canonical(raw: &str) -> Self {
        let trimmed = raw.trim().to_ascii_uppercase();
        let all_digits = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());
        if all_digits && trimmed.len() < 2 {
            return Self(format!("{trimmed:0>2}"));
        }
        Self(trimmed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DepartmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record that carries a department code, whatever its field is called.
pub trait Keyed {
    fn raw_code(&self) -> &str;

    fn department_code(&self) -> DepartmentCode {
        DepartmentCode::canonical(self.raw_code())
    }
}
