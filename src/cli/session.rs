//! The set of courses managed by one shell session.
//!
//! Courses know nothing about each other; the session owns them all and
//! tracks which one commands apply to.

use enrollment::CourseEnrollment;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Create a new course enrollment first")]
    NoActiveCourse,

    #[error("no course at index {index} (there are {count})")]
    NoSuchCourse { index: usize, count: usize },
}

#[derive(Debug, Default)]
pub struct Session {
    courses: Vec<CourseEnrollment>,
    active: Option<usize>,
}

impl Session {
    /// Adds a course and makes it the active one.
    pub fn add(&mut self, course: CourseEnrollment) -> &CourseEnrollment {
        self.courses.push(course);
        let index = self.courses.len() - 1;
        self.active = Some(index);
        &self.courses[index]
    }

    /// Makes the course at `index` the active one.
    pub fn switch(&mut self, index: usize) -> Result<&CourseEnrollment, SessionError> {
        let count = self.courses.len();
        let course = self
            .courses
            .get(index)
            .ok_or(SessionError::NoSuchCourse { index, count })?;
        self.active = Some(index);
        Ok(course)
    }

    pub fn active(&self) -> Result<&CourseEnrollment, SessionError> {
        self.active
            .and_then(|index| self.courses.get(index))
            .ok_or(SessionError::NoActiveCourse)
    }

    pub fn active_mut(&mut self) -> Result<&mut CourseEnrollment, SessionError> {
        self.active
            .and_then(|index| self.courses.get_mut(index))
            .ok_or(SessionError::NoActiveCourse)
    }

    pub fn courses(&self) -> &[CourseEnrollment] {
        &self.courses
    }
}
