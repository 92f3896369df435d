// File: ./src/model/merge.rs
use crate::model::item::Session;

/// Coalesces grid rows that belong to one physically contiguous meeting.
///
/// The grid reconstruction emits one session per spanned slot; a two-hour
/// lecture that the source table encodes as two stacked one-hour cells with
/// identical content must come out as a single session. Sessions are sorted by
/// `(monday_index, start)` and then folded left to right: a candidate extends
/// the previously accepted session iff day, title, location and description
/// all match and the times abut to the exact minute. Only immediately
/// adjacent runs merge; nothing is reordered beyond the initial sort.
pub fn coalesce(mut sessions: Vec<Session>) -> Vec<Session> {
    sessions.sort_by_key(|s| (s.day.monday_index(), s.start_minutes()));

    let mut accepted: Vec<Session> = Vec::with_capacity(sessions.len());
    for candidate in sessions {
        if let Some(last) = accepted.last_mut() {
            let continues_last = last.day == candidate.day
                && last.title == candidate.title
                && last.location == candidate.location
                && last.description == candidate.description
                && last.end_minutes() == candidate.start_minutes();
            if continues_last {
                last.duration_minutes += candidate.duration_minutes;
                continue;
            }
        }
        accepted.push(candidate);
    }
    accepted
}
