//! API call variant selection
//!
//! Several data sources map onto more than one GET variant (list-all vs.
//! get-by-id, latest vs. history). Each variant is described by a vector of
//! "this input was supplied" flags, ordered least to most specific.

/// Pick the most specific variant whose required inputs are all supplied:
/// the index of the last fully-satisfied candidate. When none is satisfied
/// the caller falls back to the least-specific variant, so 0 is returned
/// rather than an error.
pub fn pick_method(candidates: &[&[bool]]) -> usize {
    let mut picked = 0;
    for (idx, flags) in candidates.iter().enumerate() {
        if flags.iter().all(|&supplied| supplied) {
            picked = idx;
        }
    }
    picked
}
