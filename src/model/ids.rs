use chrono::Utc;

/// Issues identifiers derived from the wall clock in milliseconds.
///
/// Two ids handed out within the same millisecond (or after the clock steps
/// backwards) are bumped past the previous one, so ids are strictly
/// increasing for the life of the generator.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    last: u64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last + 1);
        self.last
    }
}
