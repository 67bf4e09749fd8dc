use super::*;

/// Page math over the index's limit/offset/total triple. `limit` must be
/// nonzero; `offset` is always a multiple of `limit`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Page {
  pub limit: u64,
  pub offset: u64,
  pub total: u64,
}

impl Page {
  pub fn new(limit: u64) -> Self {
    Self {
      limit,
      offset: 0,
      total: 0,
    }
  }

  pub fn number(self) -> u64 {
    self.offset / self.limit + 1
  }

  pub fn has_previous(self) -> bool {
    self.offset > 0
  }

  pub fn has_next(self) -> bool {
    self.offset + self.limit < self.total
  }

  pub fn previous_offset(self) -> u64 {
    self.offset.saturating_sub(self.limit)
  }

  pub fn next_offset(self) -> u64 {
    self.offset + self.limit
  }
}
