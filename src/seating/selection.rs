use super::grid::SeatPosition;

/// Места, выбранные пользователем в текущей сессии, в порядке выбора.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSelection {
    seats: Vec<SeatPosition>,
    cap: usize,
}

impl SeatSelection {
    pub const DEFAULT_CAP: usize = 4;

    pub fn new(cap: usize) -> Self {
        Self {
            seats: Vec::with_capacity(cap),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.cap
    }

    pub fn contains(&self, position: SeatPosition) -> bool {
        self.seats.contains(&position)
    }

    pub fn positions(&self) -> &[SeatPosition] {
        &self.seats
    }

    /// `false`, если место уже выбрано или лимит исчерпан.
    pub(crate) fn add(&mut self, position: SeatPosition) -> bool {
        if self.is_full() || self.contains(position) {
            return false;
        }
        self.seats.push(position);
        true
    }

    pub(crate) fn remove(&mut self, position: SeatPosition) -> bool {
        let before = self.seats.len();
        self.seats.retain(|p| *p != position);
        self.seats.len() != before
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&SeatPosition) -> bool) -> usize {
        let before = self.seats.len();
        self.seats.retain(keep);
        before - self.seats.len()
    }

    pub(crate) fn clear(&mut self) {
        self.seats.clear();
    }
}

impl Default for SeatSelection {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAP)
    }
}
