//! Candidate start-time grid
//!
//! A grid is anchored at the opening time and spaced by the place's slot
//! granularity. Only starts whose full interval fits before closing are
//! part of the grid; nothing past that point is ever generated.

use crate::domain::calendar::{TimeOfDay, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    anchor: u16,
    first: u16,
    /// Inclusive; `None` when no start fits
    last: Option<u16>,
    step: u16,
}

impl SlotGrid {
    pub fn new(opening: TimeRange, duration_minutes: u32, step_minutes: u16) -> Self {
        let anchor = opening.start().minutes();
        let step = step_minutes.max(1);
        let latest = u32::from(opening.end().minutes())
            .checked_sub(duration_minutes)
            .filter(|latest| duration_minutes > 0 && *latest >= u32::from(anchor));
        let last = latest.map(|latest| {
            let offset = (latest as u16 - anchor) / step * step;
            anchor + offset
        });
        Self {
            anchor,
            first: anchor,
            last,
            step,
        }
    }

    pub fn step_minutes(&self) -> u16 {
        self.step
    }

    pub fn is_empty(&self) -> bool {
        self.last.map_or(true, |last| last < self.first)
    }

    pub fn len(&self) -> usize {
        match self.last {
            Some(last) if last >= self.first => usize::from((last - self.first) / self.step) + 1,
            _ => 0,
        }
    }

    /// Whether `start` is one of the grid's start times
    pub fn contains(&self, start: TimeOfDay) -> bool {
        let m = start.minutes();
        match self.last {
            Some(last) => {
                m >= self.first && m <= last && (m - self.anchor) % self.step == 0
            }
            None => false,
        }
    }

    /// Restrict the grid to starts inside `window` without changing its
    /// anchor, so the result stays aligned with the full-day grid.
    pub fn within(self, window: TimeRange) -> Self {
        let Some(last) = self.last else {
            return self;
        };
        let lo = window.start().minutes().max(self.first);
        let first = self.align_up(lo);
        // Starts must be strictly before the window end
        let hi = (window.end().minutes() - 1).min(last);
        let new_last = (hi >= self.anchor).then(|| self.align_down(hi));
        Self {
            anchor: self.anchor,
            first,
            last: new_last.filter(|l| *l >= first),
            step: self.step,
        }
    }

    pub fn iter(&self) -> SlotIter {
        SlotIter {
            next: if self.is_empty() { None } else { Some(self.first) },
            last: self.last.unwrap_or(0),
            step: self.step,
        }
    }

    /// Later grid starts that fall inside the interval of a highlighted
    /// start. Purely derived: callers use it to render one block.
    pub fn blocked_by(
        &self,
        highlighted: TimeOfDay,
        duration_minutes: u32,
    ) -> impl Iterator<Item = TimeOfDay> {
        let block = TimeRange::starting_at(highlighted, duration_minutes);
        self.iter()
            .filter(move |start| *start > highlighted && block.is_some_and(|b| b.contains_time(*start)))
    }

    fn align_up(&self, m: u16) -> u16 {
        let offset = m.saturating_sub(self.anchor);
        let rem = offset % self.step;
        if rem == 0 {
            self.anchor + offset
        } else {
            self.anchor + offset + (self.step - rem)
        }
    }

    fn align_down(&self, m: u16) -> u16 {
        let offset = m - self.anchor;
        self.anchor + offset / self.step * self.step
    }
}

impl IntoIterator for &SlotGrid {
    type Item = TimeOfDay;
    type IntoIter = SlotIter;

    fn into_iter(self) -> SlotIter {
        self.iter()
    }
}

/// Lazy iterator over grid starts. Cloning restarts from the same point.
#[derive(Debug, Clone)]
pub struct SlotIter {
    next: Option<u16>,
    last: u16,
    step: u16,
}

impl Iterator for SlotIter {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<TimeOfDay> {
        let current = self.next?;
        if current > self.last {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(self.step);
        TimeOfDay::from_minutes(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn range(a: &str, b: &str) -> TimeRange {
        TimeRange::new(t(a), t(b)).unwrap()
    }

    fn starts(grid: &SlotGrid) -> Vec<String> {
        grid.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn last_slot_ends_at_closing() {
        let grid = SlotGrid::new(range("09:00", "18:00"), 30, 15);
        let all = starts(&grid);
        assert_eq!(all.first().map(String::as_str), Some("09:00"));
        assert_eq!(all.last().map(String::as_str), Some("17:30"));
        assert_eq!(grid.len(), all.len());
        assert_eq!(all.len(), 35);
    }

    #[test]
    fn duration_not_multiple_of_step() {
        // 09:00-10:00 with 40 minutes: 09:00 and 09:15 fit, 09:30 would end 10:10
        let grid = SlotGrid::new(range("09:00", "10:00"), 40, 15);
        assert_eq!(starts(&grid), vec!["09:00", "09:15"]);
    }

    #[test]
    fn too_long_service_yields_empty_grid() {
        let grid = SlotGrid::new(range("09:00", "10:00"), 90, 15);
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn contains_checks_alignment_and_bounds() {
        let grid = SlotGrid::new(range("09:00", "18:00"), 30, 15);
        assert!(grid.contains(t("09:45")));
        assert!(grid.contains(t("17:30")));
        assert!(!grid.contains(t("17:45")));
        assert!(!grid.contains(t("09:10")));
        assert!(!grid.contains(t("08:45")));
    }

    #[test]
    fn within_keeps_alignment() {
        let grid = SlotGrid::new(range("09:00", "18:00"), 30, 15).within(range("12:05", "13:00"));
        assert_eq!(starts(&grid), vec!["12:15", "12:30", "12:45"]);

        let past_close = SlotGrid::new(range("09:00", "18:00"), 30, 15).within(range("17:00", "20:00"));
        assert_eq!(starts(&past_close), vec!["17:00", "17:15", "17:30"]);

        let before_open = SlotGrid::new(range("09:00", "18:00"), 30, 15).within(range("06:00", "08:00"));
        assert!(before_open.is_empty());
    }

    #[test]
    fn iterator_is_restartable() {
        let grid = SlotGrid::new(range("09:00", "10:00"), 30, 15);
        let mut it = grid.iter();
        it.next();
        let resumed = it.clone();
        assert_eq!(it.count(), resumed.count());
        assert_eq!(grid.iter().count(), 3);
    }

    #[test]
    fn blocked_by_lists_covered_later_starts() {
        let grid = SlotGrid::new(range("09:00", "18:00"), 45, 15);
        let blocked: Vec<String> = grid.blocked_by(t("10:00"), 45).map(|s| s.to_string()).collect();
        assert_eq!(blocked, vec!["10:15", "10:30"]);
    }
}
