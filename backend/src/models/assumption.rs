//! Analyst assumptions
//!
//! Free-text notes recorded next to the inputs. They are carried through to
//! exports for the reader's reference and never enter a calculation.

use crate::core::new_record_id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assumption {
    id: String,
    text: String,
}

impl Assumption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
