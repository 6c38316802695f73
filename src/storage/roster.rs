//! Flat-text persistence for course rosters.
//!
//! A roster file holds one student per line, with fields joined by `", "` in
//! the order name, email, campus ID, prerequisite (`true`/`false`). There is
//! no header and no trailing blank line.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::{
    course::{CourseEnrollment, EnrollmentError},
    student::{parse_prerequisite, FormatError, StudentRecord},
};

/// Separator between the fields of a persisted record.
pub const SEPARATOR: &str = ", ";

/// Parses one persisted line into a [`StudentRecord`].
///
/// Surrounding whitespace on the line and on each field is ignored.
///
/// # Errors
///
/// Returns a [`FormatError`] if the line does not have exactly four fields,
/// the prerequisite field is not a boolean, or the record fails validation.
pub fn parse_record_line(line: &str) -> Result<StudentRecord, FormatError> {
    let line = line.trim();
    let fields: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();

    let &[name, email, campus_id, prerequisite] = fields.as_slice() else {
        return Err(FormatError::FieldCount {
            line: line.to_string(),
            found: fields.len(),
        });
    };

    let prerequisite = parse_prerequisite(prerequisite)?;
    StudentRecord::new(name, email, campus_id, prerequisite)
}

/// Joins the canonical text of each record with newlines.
pub(crate) fn to_text(records: &[StudentRecord]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

fn write<W: Write>(course: &CourseEnrollment, writer: &mut W) -> io::Result<()> {
    writer.write_all(course.roster_to_text().as_bytes())?;
    writer.flush()
}

fn read<R: BufRead>(course: &mut CourseEnrollment, mut reader: R) -> io::Result<LoadReport> {
    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let outcome = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => enroll_line(course, line),
            Err(error) => Err(LineErrorKind::Encoding(error)),
        };

        match outcome {
            Ok(()) => report.enrolled += 1,
            Err(kind) => {
                tracing::warn!(line = line_number, error = %kind, "skipped roster line");
                report.rejected.push(LineError {
                    line: line_number,
                    kind,
                });
            }
        }
    }

    Ok(report)
}

fn enroll_line(course: &mut CourseEnrollment, line: &str) -> Result<(), LineErrorKind> {
    let student = parse_record_line(line)?;
    if course.is_roster_full() {
        return Err(LineErrorKind::CapacityExceeded {
            capacity: course.enrollment_capacity(),
        });
    }
    course.enroll_one(student)?;
    Ok(())
}

/// Writes the roster of `course` to the file at `path`.
///
/// Parent directories are created automatically if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
#[instrument(skip(course), fields(course = course.name()))]
pub fn save(course: &CourseEnrollment, path: &Path) -> Result<(), SaveError> {
    let to_save_error = |source| SaveError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_save_error)?;
    }

    let file = File::create(path).map_err(to_save_error)?;
    let mut writer = BufWriter::new(file);
    write(course, &mut writer).map_err(to_save_error)?;

    tracing::info!(students = course.roster().len(), "saved roster");
    Ok(())
}

/// Enrolls each student listed in the file at `path` into `course`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist, or
/// [`LoadError::Io`] if it cannot be read. Problems with individual lines are
/// not errors; they are collected in the returned [`LoadReport`].
#[instrument(skip(course), fields(course = course.name()))]
pub fn load(course: &mut CourseEnrollment, path: &Path) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(io_error),
    })?;

    let report = read(course, BufReader::new(file))?;
    tracing::info!(
        enrolled = report.enrolled,
        rejected = report.rejected.len(),
        "loaded roster"
    );
    Ok(report)
}

/// The outcome of loading a roster file.
#[derive(Debug, Default)]
pub struct LoadReport {
    enrolled: usize,
    rejected: Vec<LineError>,
}

impl LoadReport {
    /// The number of students enrolled from the file.
    #[must_use]
    pub const fn enrolled(&self) -> usize {
        self.enrolled
    }

    /// The lines that were skipped, in file order.
    #[must_use]
    pub fn rejected(&self) -> &[LineError] {
        &self.rejected
    }
}

/// A roster line that could not be enrolled.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct LineError {
    /// The 1-based line number in the source file.
    pub line: usize,
    /// Why the line was rejected.
    #[source]
    pub kind: LineErrorKind,
}

/// The reason a roster line was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LineErrorKind {
    /// The line could not be parsed into a student record.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The roster was already at capacity.
    #[error("the course capacity of {capacity} would be exceeded by loading that student")]
    CapacityExceeded {
        /// The enrollment capacity at the time of the attempt.
        capacity: usize,
    },

    /// The student could not be enrolled.
    #[error(transparent)]
    Enrollment(#[from] EnrollmentError),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    Encoding(#[source] std::str::Utf8Error),
}

/// Errors that can occur when opening or reading a roster file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The roster file does not exist.
    #[error("could not find that file: {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O error occurred.
    #[error("failed to read roster")]
    Io(#[from] io::Error),
}

/// An error writing a roster file.
#[derive(Debug, thiserror::Error)]
pub struct SaveError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl SaveError {
    /// The destination that could not be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to save roster to {}", self.path.display())
    }
}
