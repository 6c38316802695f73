//! The enrollment state machine for a single course.
//!
//! A [`CourseEnrollment`] owns two ordered, capacity-bounded collections of
//! [`StudentRecord`]s: the roster of enrolled students and the waitlist. A
//! student moves between three states:
//!
//! - unlisted to waitlisted via [`CourseEnrollment::add_to_waitlist`]
//! - unlisted or waitlisted to enrolled via [`CourseEnrollment::enroll_one`]
//! - enrolled to unlisted via [`CourseEnrollment::drop_student`]
//!
//! Every mutating operation either succeeds completely or fails before any
//! state has changed.

use std::{fmt, path::Path};

use non_empty_string::NonEmptyString;
use tracing::instrument;

use crate::{
    domain::student::{CampusId, StudentRecord},
    storage::roster::{self, LoadError, LoadReport, SaveError},
};

/// The smallest enrollment capacity a course may be created with.
pub const MIN_ENROLLMENT_CAPACITY: usize = 15;

/// The largest enrollment capacity a course may be created with.
///
/// Capacity may grow past this afterwards through
/// [`CourseEnrollment::expand_capacity`].
pub const MAX_ENROLLMENT_CAPACITY: usize = 250;

/// Errors raised for invalid course parameters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The course name was empty or whitespace.
    #[error("course name must not be blank or empty")]
    BlankCourseName,

    /// The enrollment capacity was outside the allowed range.
    #[error("enrollment capacity must be between 15 and 250, got {0}")]
    EnrollmentCapacity(usize),

    /// The waitlist capacity was zero or larger than the enrollment capacity.
    #[error("waitlist capacity must be between 1 and {enrollment}, got {waitlist}")]
    WaitlistCapacity {
        /// The requested waitlist capacity.
        waitlist: usize,
        /// The enrollment capacity it was checked against.
        enrollment: usize,
    },

    /// A capacity expansion was requested with a zero amount.
    #[error("increase amount must be greater than zero")]
    ExpansionAmount,

    /// A capacity expansion would overflow the representable capacity.
    #[error("cannot increase enrollment capacity {capacity} by {amount}")]
    CapacityOverflow {
        /// The enrollment capacity before the expansion.
        capacity: usize,
        /// The requested increase.
        amount: usize,
    },
}

/// Errors raised when a student cannot move between the roster and waitlist.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnrollmentError {
    /// The student is already on the roster.
    #[error("student {0} is already enrolled")]
    AlreadyEnrolled(CampusId),

    /// The student is already on the waitlist.
    #[error("student {0} is already on the waitlist")]
    AlreadyWaitlisted(CampusId),

    /// The roster has reached its enrollment capacity.
    #[error("the course is full")]
    RosterFull,

    /// The waitlist has reached its capacity.
    #[error("the waitlist is full")]
    WaitlistFull,

    /// The student has not satisfied the course prerequisites.
    #[error("student {0} has not satisfied the prerequisites")]
    Prerequisite(CampusId),

    /// The student to drop is not on the roster.
    #[error("no matching student in roster")]
    NotInRoster(CampusId),
}

/// Error returned when a campus ID lookup finds nothing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("no student record found for campus ID '{0}'")]
pub struct NotFoundError(pub String);

/// How a successful enrollment came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrollment {
    /// The student was not on the waitlist.
    Direct,
    /// The student was promoted from the waitlist.
    FromWaitlist,
}

/// A single course's roster and waitlist.
#[derive(Debug, Clone)]
pub struct CourseEnrollment {
    name: NonEmptyString,
    roster: Vec<StudentRecord>,
    waitlist: Vec<StudentRecord>,
    enrollment_capacity: usize,
    waitlist_capacity: usize,
}

impl CourseEnrollment {
    /// Creates an empty course.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if:
    ///
    /// - the name is blank
    /// - the enrollment capacity is outside
    ///   [`MIN_ENROLLMENT_CAPACITY`]..=[`MAX_ENROLLMENT_CAPACITY`]
    /// - the waitlist capacity is zero or exceeds the enrollment capacity
    pub fn new(
        name: impl Into<String>,
        enrollment_capacity: usize,
        waitlist_capacity: usize,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::BlankCourseName);
        }
        let name = NonEmptyString::new(name).map_err(|_| ValidationError::BlankCourseName)?;

        if !(MIN_ENROLLMENT_CAPACITY..=MAX_ENROLLMENT_CAPACITY).contains(&enrollment_capacity) {
            return Err(ValidationError::EnrollmentCapacity(enrollment_capacity));
        }

        if waitlist_capacity == 0 || waitlist_capacity > enrollment_capacity {
            return Err(ValidationError::WaitlistCapacity {
                waitlist: waitlist_capacity,
                enrollment: enrollment_capacity,
            });
        }

        Ok(Self {
            name,
            roster: Vec::with_capacity(enrollment_capacity),
            waitlist: Vec::with_capacity(waitlist_capacity),
            enrollment_capacity,
            waitlist_capacity,
        })
    }

    /// The course name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The maximum number of enrolled students.
    #[must_use]
    pub const fn enrollment_capacity(&self) -> usize {
        self.enrollment_capacity
    }

    /// The maximum number of waitlisted students.
    #[must_use]
    pub const fn waitlist_capacity(&self) -> usize {
        self.waitlist_capacity
    }

    /// The enrolled students, in enrollment order.
    #[must_use]
    pub fn roster(&self) -> &[StudentRecord] {
        &self.roster
    }

    /// The waitlisted students, in the order they joined.
    #[must_use]
    pub fn waitlist(&self) -> &[StudentRecord] {
        &self.waitlist
    }

    /// Returns `true` if the roster has reached the enrollment capacity.
    #[must_use]
    pub fn is_roster_full(&self) -> bool {
        self.roster.len() >= self.enrollment_capacity
    }

    /// Returns `true` if the waitlist has reached its capacity.
    #[must_use]
    pub fn is_waitlist_full(&self) -> bool {
        self.waitlist.len() >= self.waitlist_capacity
    }

    /// Returns `true` if both the roster and the waitlist are full.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.is_roster_full() && self.is_waitlist_full()
    }

    /// Returns a snapshot of the roster.
    #[must_use]
    pub fn copy_roster(&self) -> Vec<StudentRecord> {
        self.roster.clone()
    }

    /// Returns a snapshot of the waitlist.
    #[must_use]
    pub fn copy_waitlist(&self) -> Vec<StudentRecord> {
        self.waitlist.clone()
    }

    /// Finds the first record in `records` whose campus ID is exactly
    /// `campus_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no record matches.
    pub fn search_by_id<'a>(
        campus_id: &str,
        records: &'a [StudentRecord],
    ) -> Result<&'a StudentRecord, NotFoundError> {
        records
            .iter()
            .find(|record| record.key() == campus_id)
            .ok_or_else(|| NotFoundError(campus_id.to_string()))
    }

    /// Appends a student to the end of the waitlist.
    ///
    /// # Errors
    ///
    /// Checked in this order, returns:
    ///
    /// - [`EnrollmentError::AlreadyWaitlisted`] if the student is on the
    ///   waitlist
    /// - [`EnrollmentError::AlreadyEnrolled`] if the student is on the roster
    /// - [`EnrollmentError::WaitlistFull`] if the waitlist is at capacity
    /// - [`EnrollmentError::Prerequisite`] if the student has not satisfied
    ///   the prerequisites
    #[instrument(skip(self), fields(course = %self.name))]
    pub fn add_to_waitlist(&mut self, student: StudentRecord) -> Result<(), EnrollmentError> {
        if position(&self.waitlist, &student).is_some() {
            return Err(EnrollmentError::AlreadyWaitlisted(student.campus_id().clone()));
        }
        if position(&self.roster, &student).is_some() {
            return Err(EnrollmentError::AlreadyEnrolled(student.campus_id().clone()));
        }
        if self.is_waitlist_full() {
            return Err(EnrollmentError::WaitlistFull);
        }
        if !student.is_prerequisite_satisfied() {
            return Err(EnrollmentError::Prerequisite(student.campus_id().clone()));
        }

        tracing::debug!(name = student.name(), "added to waitlist");
        self.waitlist.push(student);
        Ok(())
    }

    /// Appends a student to the end of the roster, removing them from the
    /// waitlist if they were on it.
    ///
    /// # Errors
    ///
    /// Checked in this order, returns:
    ///
    /// - [`EnrollmentError::AlreadyEnrolled`] if the student is on the roster
    /// - [`EnrollmentError::RosterFull`] if the roster is at capacity
    /// - [`EnrollmentError::Prerequisite`] if the student has not satisfied
    ///   the prerequisites
    #[instrument(skip(self), fields(course = %self.name))]
    pub fn enroll_one(&mut self, student: StudentRecord) -> Result<Enrollment, EnrollmentError> {
        if position(&self.roster, &student).is_some() {
            return Err(EnrollmentError::AlreadyEnrolled(student.campus_id().clone()));
        }
        if self.is_roster_full() {
            return Err(EnrollmentError::RosterFull);
        }
        if !student.is_prerequisite_satisfied() {
            return Err(EnrollmentError::Prerequisite(student.campus_id().clone()));
        }

        let enrollment = match position(&self.waitlist, &student) {
            Some(index) => {
                self.waitlist.remove(index);
                tracing::debug!(name = student.name(), "promoted from waitlist");
                Enrollment::FromWaitlist
            }
            None => Enrollment::Direct,
        };

        tracing::info!(
            name = student.name(),
            campus_id = %student.campus_id(),
            "enrolled"
        );
        self.roster.push(student);
        Ok(enrollment)
    }

    /// Removes a student from the roster. The waitlist is untouched.
    ///
    /// Returns the record that was removed.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentError::NotInRoster`] if the student is not enrolled.
    #[instrument(skip(self), fields(course = %self.name))]
    pub fn drop_student(
        &mut self,
        student: &StudentRecord,
    ) -> Result<StudentRecord, EnrollmentError> {
        let index = position(&self.roster, student)
            .ok_or_else(|| EnrollmentError::NotInRoster(student.campus_id().clone()))?;
        let removed = self.roster.remove(index);
        tracing::debug!(name = removed.name(), "dropped");
        Ok(removed)
    }

    /// Increases the enrollment capacity by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ExpansionAmount`] if `amount` is zero, or
    /// [`ValidationError::CapacityOverflow`] if the new capacity would not fit
    /// in a `usize`. The capacity is unchanged on error.
    pub fn expand_capacity(&mut self, amount: usize) -> Result<(), ValidationError> {
        if amount == 0 {
            return Err(ValidationError::ExpansionAmount);
        }
        self.enrollment_capacity = self.enrollment_capacity.checked_add(amount).ok_or(
            ValidationError::CapacityOverflow {
                capacity: self.enrollment_capacity,
                amount,
            },
        )?;
        tracing::debug!(
            course = %self.name,
            capacity = self.enrollment_capacity,
            "expanded enrollment capacity"
        );
        Ok(())
    }

    /// Renders the roster in its persisted form: one canonical record per
    /// line, in roster order, with no trailing whitespace.
    #[must_use]
    pub fn roster_to_text(&self) -> String {
        roster::to_text(&self.roster)
    }

    /// Writes the roster to the file at `path`, replacing any existing
    /// content.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if the file cannot be created or written.
    pub fn save_roster(&self, path: &Path) -> Result<(), SaveError> {
        roster::save(self, path)
    }

    /// Enrolls every student listed in the file at `path`.
    ///
    /// Lines that cannot be parsed or enrolled are skipped and reported in
    /// the returned [`LoadReport`]; loading carries on with the next line.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be opened or read.
    pub fn load_roster(&mut self, path: &Path) -> Result<LoadReport, LoadError> {
        roster::load(self, path)
    }

    /// Returns a displayable listing of the waitlist.
    #[must_use]
    pub const fn waitlist_report(&self) -> WaitlistReport<'_> {
        WaitlistReport { course: self }
    }
}

/// Position of `student` in `records`, compared by identity key.
fn position(records: &[StudentRecord], student: &StudentRecord) -> Option<usize> {
    records
        .iter()
        .position(|record| record.key() == student.key())
}

/// Course summary: name, enrolled count, then one numbered line per student.
impl fmt::Display for CourseEnrollment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Course Name: {}", self.name)?;
        write!(f, "\nNumber of enrolled students: {}", self.roster.len())?;
        for (i, student) in self.roster.iter().enumerate() {
            write!(f, "\n{}. {student}", i + 1)?;
        }
        Ok(())
    }
}

/// A listing of a course's waitlist.
///
/// Returned by [`CourseEnrollment::waitlist_report`].
#[derive(Debug, Clone, Copy)]
pub struct WaitlistReport<'a> {
    course: &'a CourseEnrollment,
}

impl fmt::Display for WaitlistReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Waitlist capacity: {}", self.course.waitlist_capacity)?;
        if self.course.waitlist.is_empty() {
            return write!(f, "\nThe waitlist is empty.");
        }
        for (i, student) in self.course.waitlist.iter().enumerate() {
            write!(f, "\n{}. {student}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use test_case::test_case;
    use tracing::{
        field::{Field, Visit},
        Event, Subscriber,
    };
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    use super::*;

    fn student(campus_id: &str) -> StudentRecord {
        StudentRecord::new("Rob", "rob@wisc.edu", campus_id, true).unwrap()
    }

    fn student_without_prerequisites(campus_id: &str) -> StudentRecord {
        StudentRecord::new("Sean", "sean@wisc.edu", campus_id, false).unwrap()
    }

    /// Ten-character campus IDs distinguished by index.
    fn campus_id(i: usize) -> String {
        format!("{i:010}")
    }

    fn course() -> CourseEnrollment {
        CourseEnrollment::new("CS300", 15, 5).unwrap()
    }

    #[test_case("CS300", 15, 5; "minimum capacity")]
    #[test_case("CS300", 250, 250; "maximum capacity with equal waitlist")]
    #[test_case("CS300", 100, 1; "single waitlist slot")]
    fn construction_accepts_valid_parameters(name: &str, enrollment: usize, waitlist: usize) {
        let course = CourseEnrollment::new(name, enrollment, waitlist).unwrap();
        assert_eq!(course.name(), name);
        assert_eq!(course.enrollment_capacity(), enrollment);
        assert_eq!(course.waitlist_capacity(), waitlist);
        assert!(course.roster().is_empty());
        assert!(course.waitlist().is_empty());
    }

    #[test_case("", 15, 5, ValidationError::BlankCourseName; "empty name")]
    #[test_case("  ", 15, 5, ValidationError::BlankCourseName; "blank name")]
    #[test_case("CS300", 14, 5, ValidationError::EnrollmentCapacity(14); "capacity below range")]
    #[test_case("CS300", 251, 5, ValidationError::EnrollmentCapacity(251); "capacity above range")]
    #[test_case(
        "CS300", 15, 0,
        ValidationError::WaitlistCapacity { waitlist: 0, enrollment: 15 };
        "zero waitlist"
    )]
    #[test_case(
        "CS300", 15, 16,
        ValidationError::WaitlistCapacity { waitlist: 16, enrollment: 15 };
        "waitlist larger than roster"
    )]
    fn construction_rejects_invalid_parameters(
        name: &str,
        enrollment: usize,
        waitlist: usize,
        expected: ValidationError,
    ) {
        let error = CourseEnrollment::new(name, enrollment, waitlist).unwrap_err();
        assert_eq!(error, expected);
    }

    #[test]
    fn waitlisted_student_is_promoted_on_enrollment() {
        let mut course = course();
        let a = student("1234567890");

        course.add_to_waitlist(a.clone()).unwrap();
        assert_eq!(course.waitlist(), &[a.clone()]);

        let outcome = course.enroll_one(a.clone()).unwrap();
        assert_eq!(outcome, Enrollment::FromWaitlist);
        assert_eq!(course.roster(), &[a.clone()]);
        assert!(course.waitlist().is_empty());

        let error = course.enroll_one(a).unwrap_err();
        assert!(matches!(error, EnrollmentError::AlreadyEnrolled(_)));
        assert_eq!(course.roster().len(), 1);
    }

    #[test]
    fn direct_enrollment_reports_direct() {
        let mut course = course();
        assert_eq!(
            course.enroll_one(student("1234567890")).unwrap(),
            Enrollment::Direct
        );
    }

    #[test]
    fn promotion_only_removes_the_promoted_student() {
        let mut course = course();
        let a = student("0000000001");
        let b = student("0000000002");
        let c = student("0000000003");
        course.add_to_waitlist(a.clone()).unwrap();
        course.add_to_waitlist(b.clone()).unwrap();
        course.add_to_waitlist(c.clone()).unwrap();

        course.enroll_one(b).unwrap();

        assert_eq!(course.waitlist(), &[a, c]);
    }

    #[test]
    fn enrollment_requires_prerequisites() {
        let mut course = course();
        let error = course
            .enroll_one(student_without_prerequisites("1234567890"))
            .unwrap_err();
        assert!(matches!(error, EnrollmentError::Prerequisite(_)));
        assert!(course.roster().is_empty());
    }

    #[test]
    fn roster_never_exceeds_capacity() {
        let mut course = course();
        for i in 0..15 {
            course.enroll_one(student(&campus_id(i))).unwrap();
        }
        assert!(course.is_roster_full());

        let error = course.enroll_one(student(&campus_id(15))).unwrap_err();
        assert_eq!(error, EnrollmentError::RosterFull);
        assert_eq!(course.roster().len(), 15);
    }

    #[test]
    fn already_enrolled_is_reported_before_full() {
        let mut course = course();
        for i in 0..15 {
            course.enroll_one(student(&campus_id(i))).unwrap();
        }
        let error = course.enroll_one(student(&campus_id(3))).unwrap_err();
        assert!(matches!(error, EnrollmentError::AlreadyEnrolled(_)));
    }

    #[test]
    fn waitlist_never_exceeds_capacity() {
        let mut course = course();
        for i in 0..5 {
            course.add_to_waitlist(student(&campus_id(i))).unwrap();
        }
        assert!(course.is_waitlist_full());

        let error = course.add_to_waitlist(student(&campus_id(5))).unwrap_err();
        assert_eq!(error, EnrollmentError::WaitlistFull);
        assert_eq!(course.waitlist().len(), 5);
    }

    #[test]
    fn waitlist_rejects_duplicates_and_enrolled_students() {
        let mut course = course();
        let a = student("0000000001");
        let b = student("0000000002");

        course.add_to_waitlist(a.clone()).unwrap();
        assert!(matches!(
            course.add_to_waitlist(a).unwrap_err(),
            EnrollmentError::AlreadyWaitlisted(_)
        ));

        course.enroll_one(b.clone()).unwrap();
        assert!(matches!(
            course.add_to_waitlist(b).unwrap_err(),
            EnrollmentError::AlreadyEnrolled(_)
        ));
    }

    #[test]
    fn waitlist_requires_prerequisites() {
        let mut course = course();
        let error = course
            .add_to_waitlist(student_without_prerequisites("1234567890"))
            .unwrap_err();
        assert!(matches!(error, EnrollmentError::Prerequisite(_)));
        assert!(course.waitlist().is_empty());
    }

    #[test]
    fn closed_when_both_lists_full() {
        let mut course = CourseEnrollment::new("CS300", 15, 1).unwrap();
        for i in 0..15 {
            course.enroll_one(student(&campus_id(i))).unwrap();
        }
        assert!(!course.is_closed());
        course.add_to_waitlist(student(&campus_id(99))).unwrap();
        assert!(course.is_closed());
    }

    #[test]
    fn dropped_student_can_no_longer_be_found() {
        let mut course = course();
        let a = student("1234567890");
        course.enroll_one(a.clone()).unwrap();

        let removed = course.drop_student(&a).unwrap();
        assert_eq!(removed, a);

        let roster = course.copy_roster();
        let error = CourseEnrollment::search_by_id("1234567890", &roster).unwrap_err();
        assert_eq!(error, NotFoundError("1234567890".to_string()));
    }

    #[test]
    fn dropping_unenrolled_student_fails_and_leaves_waitlist() {
        let mut course = course();
        let a = student("1234567890");
        course.add_to_waitlist(a.clone()).unwrap();

        let error = course.drop_student(&a).unwrap_err();
        assert!(matches!(error, EnrollmentError::NotInRoster(_)));
        assert_eq!(error.to_string(), "no matching student in roster");
        assert_eq!(course.waitlist(), &[a]);
    }

    #[test]
    fn search_returns_first_match() {
        let first = StudentRecord::new("First", "first@wisc.edu", "1234567890", true).unwrap();
        let second = StudentRecord::new("Second", "second@wisc.edu", "1234567890", true).unwrap();
        let records = vec![first, second];

        let found = CourseEnrollment::search_by_id("1234567890", &records).unwrap();
        assert_eq!(found.name(), "First");
    }

    #[test]
    fn search_is_exact() {
        let records = vec![student("1234567890")];
        assert!(CourseEnrollment::search_by_id(" 1234567890", &records).is_err());
    }

    #[test]
    fn copies_are_independent_snapshots() {
        let mut course = course();
        course.enroll_one(student("0000000001")).unwrap();
        course.add_to_waitlist(student("0000000002")).unwrap();

        let roster = course.copy_roster();
        let waitlist = course.copy_waitlist();
        course.enroll_one(student("0000000003")).unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(waitlist.len(), 1);
        assert_eq!(course.roster().len(), 2);
    }

    #[test]
    fn expanding_capacity_admits_more_students() {
        let mut course = course();
        for i in 0..15 {
            course.enroll_one(student(&campus_id(i))).unwrap();
        }
        course.expand_capacity(2).unwrap();

        assert_eq!(course.enrollment_capacity(), 17);
        assert_eq!(course.waitlist_capacity(), 5);
        course.enroll_one(student(&campus_id(15))).unwrap();
        assert!(!course.is_roster_full());
    }

    #[test]
    fn expanding_by_zero_fails() {
        let mut course = course();
        assert_eq!(
            course.expand_capacity(0).unwrap_err(),
            ValidationError::ExpansionAmount
        );
        assert_eq!(course.enrollment_capacity(), 15);
    }

    #[test]
    fn expanding_past_usize_max_fails_without_change() {
        let mut course = course();
        assert_eq!(
            course.expand_capacity(usize::MAX).unwrap_err(),
            ValidationError::CapacityOverflow {
                capacity: 15,
                amount: usize::MAX,
            }
        );
        assert_eq!(course.enrollment_capacity(), 15);

        course.expand_capacity(usize::MAX - 15).unwrap();
        assert_eq!(course.enrollment_capacity(), usize::MAX);
    }

    /// Records the fields of every event emitted while installed.
    #[derive(Debug, Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<HashMap<String, String>>>>);

    impl CapturedEvents {
        fn with_message(&self, message: &str) -> Vec<HashMap<String, String>> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|fields| fields.get("message").map(String::as_str) == Some(message))
                .cloned()
                .collect()
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = EventFields::default();
            event.record(&mut fields);
            self.0.lock().unwrap().push(fields.0);
        }
    }

    #[derive(Default)]
    struct EventFields(HashMap<String, String>);

    impl Visit for EventFields {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{value:?}"));
        }
    }

    #[test]
    fn enrollment_emits_one_enrolled_event_with_name() {
        let events = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut course = course();
            let rob = StudentRecord::new("Rob", "rob@wisc.edu", "1234567890", true).unwrap();
            course.enroll_one(rob.clone()).unwrap();
            course.enroll_one(rob).unwrap_err();
            course
                .enroll_one(student_without_prerequisites("0987654321"))
                .unwrap_err();
        });

        let enrolled = events.with_message("enrolled");
        assert_eq!(enrolled.len(), 1);
        assert_eq!(enrolled[0].get("name").map(String::as_str), Some("Rob"));
        assert_eq!(
            enrolled[0].get("campus_id").map(String::as_str),
            Some("1234567890")
        );
    }

    #[test]
    fn summary_lists_numbered_roster() {
        let mut course = course();
        course
            .enroll_one(StudentRecord::new("Rob", "rob@wisc.edu", "0000000001", true).unwrap())
            .unwrap();
        course
            .enroll_one(StudentRecord::new("Sean", "sean@wisc.edu", "0000000002", true).unwrap())
            .unwrap();

        assert_eq!(
            course.to_string(),
            "Course Name: CS300\nNumber of enrolled students: 2\n\
             1. Rob, rob@wisc.edu, 0000000001, true\n\
             2. Sean, sean@wisc.edu, 0000000002, true"
        );
    }

    #[test]
    fn waitlist_report_formats() {
        let mut course = course();
        assert_eq!(
            course.waitlist_report().to_string(),
            "Waitlist capacity: 5\nThe waitlist is empty."
        );

        course
            .add_to_waitlist(StudentRecord::new("Rob", "rob@wisc.edu", "0000000001", true).unwrap())
            .unwrap();
        assert_eq!(
            course.waitlist_report().to_string(),
            "Waitlist capacity: 5\n1. Rob, rob@wisc.edu, 0000000001, true"
        );
    }
}
