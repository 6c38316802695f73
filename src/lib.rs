//! Course Enrollment
//!
//! A course has a capacity-bounded roster and waitlist of student records.
//! Rosters persist as plain text, one student per line.

pub mod domain;
pub use domain::{
    course::{MAX_ENROLLMENT_CAPACITY, MIN_ENROLLMENT_CAPACITY},
    CampusId, Config, CourseEnrollment, Enrollment, EnrollmentError, FormatError, NotFoundError,
    StudentRecord, ValidationError,
};

/// Plain-text persistence for rosters.
pub mod storage;
pub use storage::{parse_record_line, LoadError, LoadReport, SaveError};
