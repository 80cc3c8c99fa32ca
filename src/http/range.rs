//! Byte-range request handling
//!
//! Resolves a `Range` header against a known body length. Only single
//! `bytes=` ranges are honored; multi-range and malformed headers are
//! treated as absent, which per RFC 7233 means the full body is served.

/// A resolved, inclusive byte range, guaranteed to lie within the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Outcome of resolving a `Range` header against a body of `len` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No usable range; serve the whole body.
    Full,
    /// Serve the given slice with status 206.
    Partial(ByteRange),
    /// Range cannot be satisfied; respond 416.
    Unsatisfiable,
}

/// Resolve `header` (the raw `Range` value, if present) against a body of
/// `len` bytes.
///
/// Accepted forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn resolve_range(header: Option<&str>, len: u64) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };
    if spec.contains(',') {
        // Multi-range is not supported; serve the full body instead.
        return RangeOutcome::Full;
    }
    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if len == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // Suffix form: "-N" means the final N bytes
    if start_str.is_empty() {
        return match end_str.parse::<u64>() {
            Ok(0) => RangeOutcome::Unsatisfiable,
            Ok(suffix) => RangeOutcome::Partial(ByteRange {
                start: len.saturating_sub(suffix),
                end: len - 1,
            }),
            Err(_) => RangeOutcome::Full,
        };
    }

    let Ok(start) = start_str.parse::<u64>() else {
        return RangeOutcome::Full;
    };
    if start >= len {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        len - 1
    } else {
        match end_str.parse::<u64>() {
            Ok(end) => end.min(len - 1),
            Err(_) => return RangeOutcome::Full,
        }
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange { start, end })
}
