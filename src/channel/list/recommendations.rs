//! Recommendation and medal tables

use super::super::codec::TableOffset;
use super::super::constants::Medal;
use super::super::defaults::{
    DEFAULT_BRONZE_VOTES, DEFAULT_GOLD_VOTES, DEFAULT_PLATINUM_VOTES, DEFAULT_SILVER_VOTES,
};
use super::header::SectionRef;
use super::tables::RecentRecommendationEntry;
use super::List;
use crate::exceptions::{ChannelError, Result, to_u32};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum vote counts for each medal tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedalThresholds {
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
    pub platinum: u32,
}

impl Default for MedalThresholds {
    fn default() -> Self {
        Self {
            bronze: DEFAULT_BRONZE_VOTES,
            silver: DEFAULT_SILVER_VOTES,
            gold: DEFAULT_GOLD_VOTES,
            platinum: DEFAULT_PLATINUM_VOTES,
        }
    }
}

impl MedalThresholds {
    /// Tiers must be strictly increasing
    pub fn validate(&self) -> Result<()> {
        if self.bronze < self.silver && self.silver < self.gold && self.gold < self.platinum {
            return Ok(());
        }
        Err(ChannelError::Config(format!(
            "medal thresholds must be strictly increasing, got {}/{}/{}/{}",
            self.bronze, self.silver, self.gold, self.platinum
        )))
    }

    pub fn medal(&self, votes: u32) -> Medal {
        if votes >= self.platinum {
            Medal::Platinum
        } else if votes >= self.gold {
            Medal::Gold
        } else if votes >= self.silver {
            Medal::Silver
        } else if votes >= self.bronze {
            Medal::Bronze
        } else {
            Medal::None
        }
    }
}

/// Votes ordered by descending count, then identifier
pub fn ranked_votes(votes: &HashMap<String, u32>) -> Vec<(&str, u32)> {
    let mut ranked: Vec<(&str, u32)> = votes.iter().map(|(id, count)| (id.as_str(), *count)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

impl List {
    pub(super) fn make_recommendations(&mut self, ranked: &[(&str, u32)]) -> Result<()> {
        let offset = self.current_offset()?;

        let mut table = Vec::new();
        for (title_id, _) in ranked {
            if let Some(title_offset) = self.title_offset(title_id)? {
                table.push(TableOffset(title_offset));
            }
        }

        debug!("👍 {}: {} recommended titles", self.locale, table.len());
        self.header.recommendations = SectionRef {
            count: to_u32(table.len(), "recommendation count")?,
            offset,
        };
        self.recommendations = table;
        Ok(())
    }

    pub(super) fn make_recent_recommendations(
        &mut self,
        ranked: &[(&str, u32)],
        medals: &MedalThresholds,
    ) -> Result<()> {
        let offset = self.current_offset()?;

        let mut table = Vec::new();
        for (title_id, count) in ranked {
            if let Some(title_offset) = self.title_offset(title_id)? {
                table.push(RecentRecommendationEntry {
                    title_offset,
                    medal: medals.medal(*count) as u8,
                });
            }
        }

        self.header.recent_recommendations = SectionRef {
            count: to_u32(table.len(), "recent recommendation count")?,
            offset,
        };
        self.recent_recommendations = table;
        Ok(())
    }
}
