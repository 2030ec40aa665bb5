//! Projection of the displayed month into the submission payload.

use shared::AttendanceSubmission;

use crate::domain::models::{iso_date, MonthContext, SubmissionRejection};
use crate::domain::selection::SelectionStore;

/// Build the payload handed to the attendance store.
///
/// Pure projection: no validation happens here, see [`validate_submission`].
pub fn build_submission(context: &MonthContext, selection: &SelectionStore) -> AttendanceSubmission {
    let selected_dates: Vec<String> = selection.worked_dates().into_iter().map(iso_date).collect();

    AttendanceSubmission {
        month: context.month,
        year: context.year,
        total_days: context.total_days,
        total_working_days: context.total_working_days,
        worked_days: selected_dates.len() as u32,
        selected_dates,
    }
}

/// Checks applied before a payload is sent to the store
pub fn validate_submission(submission: &AttendanceSubmission) -> Result<(), SubmissionRejection> {
    if submission.worked_days == 0 {
        return Err(SubmissionRejection::NoWorkedDays);
    }
    if submission.total_working_days == 0 {
        return Err(SubmissionRejection::NoWorkingDays);
    }
    if submission.worked_days > submission.total_working_days {
        return Err(SubmissionRejection::WorkedExceedsWorking {
            worked: submission.worked_days,
            working: submission.total_working_days,
        });
    }
    if submission.total_working_days > submission.total_days {
        return Err(SubmissionRejection::WorkingExceedsTotal {
            working: submission.total_working_days,
            total: submission.total_days,
        });
    }
    Ok(())
}
