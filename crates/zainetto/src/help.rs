//! Study-help text shown on request.
//!
//! Advisory only: nothing here reads or writes assignment state.

use chrono::{Datelike, NaiveDate};

const STUDY_TIPS: &[&str] = &[
    "Start with the assignment due soonest, not the one you like most.",
    "Break large assignments into 25-minute blocks with short breaks between them.",
    "Write down what you will do before you start, even if it is one sentence.",
    "Do the hardest subject first, while your focus is fresh.",
    "Re-read the assignment prompt after finishing; it is the cheapest way to catch a miss.",
    "If you are stuck for more than 15 minutes, write down the exact question and move on.",
    "Plan tomorrow's homework tonight, while today's is still in your head.",
    "Keep your phone in another room for the first block of work.",
    "Finishing a day early beats finishing an hour late. Pad your deadlines.",
    "Explain the topic out loud to nobody. If you stumble, that part needs review.",
];

/// Pick the tip for a given day.
///
/// The same day always yields the same tip, so reloading the page does not
/// shuffle the text out from under the reader.
pub fn tip_for_day(day: NaiveDate) -> &'static str {
    let idx = day.num_days_from_ce().rem_euclid(STUDY_TIPS.len() as i32) as usize;
    STUDY_TIPS[idx]
}
