//! Reserved field names.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Default cache key of the "extra active" flag.
pub const EXTRA_FLAG_KEY: &str = "extraActive";
/// Default cache key of the "prompt enabled" flag.
pub const PROMPT_FLAG_KEY: &str = "promptTextActive";
/// Names of compiler outputs, never usable as fields.
pub const OUTPUT_NAMES: [&str; 2] = ["compiled_prompt", "extra_compiled"];

/// Names that templates may not declare as fields.
///
/// Flag keys share the cache with field values, so a field using one of
/// them would overwrite the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedNames {
    names: FxHashSet<SmolStr>,
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self::with_flag_keys(EXTRA_FLAG_KEY, PROMPT_FLAG_KEY)
    }
}

impl ReservedNames {
    /// Reserves the given flag keys plus the compiler output names.
    #[must_use]
    pub fn with_flag_keys(extra_flag_key: &str, prompt_flag_key: &str) -> Self {
        let names = [extra_flag_key, prompt_flag_key]
            .into_iter()
            .chain(OUTPUT_NAMES)
            .map(SmolStr::new)
            .collect();
        Self { names }
    }

    /// Returns true if `name` is reserved. Matching is case-sensitive.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
