//! Play-time statistics table of an info file

use super::super::codec::{ByteWriter, Record};
use super::super::records::PlayTimeRecord;

/// Aggregated play statistics shown on a title's page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimePlayed {
    /// Total time played in hours
    pub total_time_played: u32,
    /// Minutes per player
    pub time_per_person: u32,
    pub total_times_played: u32,
    /// Sessions per player, times 100
    pub times_played_per_person: u32,
}

impl TimePlayed {
    /// Derive the table from raw aggregates; `None` when nobody played
    pub fn from_record(record: &PlayTimeRecord) -> Option<Self> {
        if record.players == 0 {
            return None;
        }
        Some(Self {
            total_time_played: record.time_played / 60,
            time_per_person: record.time_played / record.players,
            total_times_played: record.times_played,
            times_played_per_person: (record.times_played / record.players).saturating_mul(100),
        })
    }
}

impl Record for TimePlayed {
    const SIZE: usize = 16;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.total_time_played);
        w.u32(self.time_per_person);
        w.u32(self.total_times_played);
        w.u32(self.times_played_per_person);
    }
}
