//! RML text codec.
//!
//! RML is a line-oriented `key: value` format with one cosmetic `[STEP n]`
//! header per wizard step. Lists repeat their key; `session.*` and
//! `subRole.*` records start at their `.id` key.
//!
//! ```text
//! # OpenRML role profile
//! RML-VERSION: 1.0
//! IDENTITY: rml1-…; base=…; behavior=…
//!
//! [STEP 1: BASE]
//! name: Sleep Coach
//! tag: health
//! tag: habits
//! ...
//! [STEP 8: ETHICS]
//! ethicalRule: [refer] No medical diagnoses
//! ```

mod export;
mod import;
pub(crate) mod keys;
pub(crate) mod text;

use serde::{Deserialize, Serialize};

pub use export::{RML_FORMAT_VERSION, export_file_name, export_role_to_text};
pub(crate) use export::section_lines;
pub use import::{ImportResult, parse_rml_role};

use crate::config::IdentityOptions;
use crate::role::Role;

/// Options that change how RML text is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecOptions {
    pub identity: IdentityOptions,
}

/// Codec bound to one set of options.
#[derive(Debug, Clone, Default)]
pub struct RmlCodec {
    options: CodecOptions,
}

impl RmlCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn parse(&self, text: &str) -> ImportResult {
        parse_rml_role(text, &self.options)
    }

    pub fn export(&self, role: &Role) -> String {
        export_role_to_text(role)
    }
}
