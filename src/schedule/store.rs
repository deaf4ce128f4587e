use super::BreakTime;

/// The device's own break schedule.
///
/// Entries are kept sorted ascending by `(hour, minute)` after every add.
/// The sort is stable and duplicates are kept: two entries at the same time
/// are a valid schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStore {
    entries: Vec<BreakTime>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a time and restore sorted order.
    ///
    /// Validation happens at [`BreakTime`] construction, so adding never
    /// fails. The sort is stable, so equal entries keep insertion order.
    pub fn add(&mut self, time: BreakTime) {
        self.entries.push(time);
        self.entries.sort();
    }

    /// All entries, sorted ascending.
    pub fn all(&self) -> &[BreakTime] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Break times imported from other devices' codes.
///
/// Append-only and deliberately unsorted: entries stay in scan order and
/// are not deduplicated against each other or the device's own schedule.
#[derive(Debug, Clone, Default)]
pub struct ScannedSchedule {
    entries: Vec<BreakTime>,
}

impl ScannedSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded entries in payload order.
    pub fn extend(&mut self, times: impl IntoIterator<Item = BreakTime>) {
        self.entries.extend(times);
    }

    /// All entries, in the order they were scanned.
    pub fn all(&self) -> &[BreakTime] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
