use chrono::NaiveDate;

use crate::model::UserData;

/// Records activity on `today` and returns the resulting streak length.
///
/// Same day leaves the streak alone, the next calendar day extends it, and
/// anything else (a gap, or a clock that went backwards) restarts it at today.
pub fn record_activity(data: &mut UserData, today: NaiveDate) -> usize {
    match data.last_active {
        Some(last) if last == today => return data.streaks.len(),
        Some(last) if last.succ_opt() == Some(today) => data.streaks.push(today),
        Some(_) => data.streaks = vec![today],
        None => data.streaks.push(today),
    }
    data.last_active = Some(today);
    data.streaks.len()
}
