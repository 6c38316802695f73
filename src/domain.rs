//! Domain models for course enrollment.
//!
//! This module contains the student record value object, the enrollment
//! state machine for a single course, and the shell configuration.

/// Student records and their field validators.
pub mod student;
pub use student::{CampusId, FormatError, StudentRecord};

/// The roster and waitlist of a single course.
pub mod course;
pub use course::{
    CourseEnrollment, Enrollment, EnrollmentError, NotFoundError, ValidationError,
    WaitlistReport,
};

mod config;
pub use config::Config;
