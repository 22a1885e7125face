//! Bounded, prioritized pagination.
//!
//! Takes an already priority-ordered record list and emits the largest
//! prefix, starting at a caller-supplied offset, whose serialized
//! response stays under a fixed character budget. Continuation is
//! offset-based so callers can resume where a truncated response
//! stopped.

use serde::Serialize;

use crate::error::{EditorError, Result};

/// Default response budget in serialized characters
pub const DEFAULT_BUDGET_CHARS: usize = 20_000;

/// Default safety margin applied to each shrink step
pub const DEFAULT_SHRINK_MARGIN: f64 = 0.05;

/// One page of a size-limited response
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub returned_count: usize,
    pub remaining_count: usize,
    pub size_limited: bool,
    /// Serialized size of this response in characters
    pub response_chars: usize,
    /// Offset to pass on the next call when `size_limited`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
    /// Human-readable continuation hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

/// Stateless size-budgeted paginator
#[derive(Debug, Clone)]
pub struct Paginator {
    budget_chars: usize,
    shrink_margin: f64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            budget_chars: DEFAULT_BUDGET_CHARS,
            shrink_margin: DEFAULT_SHRINK_MARGIN,
        }
    }
}

impl Paginator {
    /// A paginator with the given character budget.
    ///
    /// A non-positive budget is a contract violation and is rejected
    /// rather than clamped.
    pub fn new(budget_chars: usize) -> Result<Self> {
        if budget_chars == 0 {
            return Err(EditorError::Config(
                "pagination budget must be positive".to_string(),
            ));
        }
        Ok(Self {
            budget_chars,
            ..Self::default()
        })
    }

    /// Override the shrink safety margin (must be in `[0, 1)`).
    ///
    /// The margin keeps the proportional shrink step from oscillating
    /// around the budget boundary.
    pub fn with_margin(mut self, margin: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&margin) {
            return Err(EditorError::Config(format!(
                "shrink margin must be in [0, 1): {margin}"
            )));
        }
        self.shrink_margin = margin;
        Ok(self)
    }

    pub fn budget_chars(&self) -> usize {
        self.budget_chars
    }

    /// Emit the largest prefix of `records[offset..]` that fits the
    /// budget. A single record is always emitted even when it alone
    /// exceeds the budget; the reported `total_count` is the full input
    /// length, independent of the window.
    pub fn paginate<T>(&self, records: &[T], offset: usize) -> Result<Page<T>>
    where
        T: Serialize + Clone,
    {
        let total = records.len();
        if offset >= total {
            let mut page = build_page(&[], total, offset, 0);
            page.response_chars = measure(&page)?;
            return Ok(page);
        }

        let available = total - offset;
        let mut candidate = available;

        loop {
            let mut page = build_page(records, total, offset, candidate);
            let size = measure(&page)?;

            if size <= self.budget_chars || candidate == 1 {
                page.response_chars = size;
                return Ok(page);
            }

            // Proportional shrink with a safety margin; the clamp below
            // makes the length strictly decreasing, so the loop
            // terminates in O(log n) iterations.
            let ratio = self.budget_chars as f64 / size as f64;
            let scaled = (candidate as f64 * ratio * (1.0 - self.shrink_margin)).floor() as usize;
            candidate = scaled.clamp(1, candidate - 1);
        }
    }
}

fn build_page<T: Serialize + Clone>(
    records: &[T],
    total: usize,
    offset: usize,
    len: usize,
) -> Page<T> {
    let items: Vec<T> = if len == 0 {
        Vec::new()
    } else {
        records[offset..offset + len].to_vec()
    };

    let returned_count = items.len();
    let remaining_count = total.saturating_sub(offset + returned_count);
    let size_limited = total.saturating_sub(offset) > returned_count;
    let next_offset = size_limited.then_some(offset + returned_count);
    let continuation = next_offset.map(|next| {
        format!("{remaining_count} more records available; call again with offset={next}")
    });

    Page {
        items,
        total_count: total,
        returned_count,
        remaining_count,
        size_limited,
        response_chars: 0,
        next_offset,
        continuation,
    }
}

fn measure<T: Serialize>(page: &Page<T>) -> Result<usize> {
    let json = serde_json::to_string(page).map_err(|e| EditorError::Parse(e.to_string()))?;
    Ok(json.chars().count())
}
