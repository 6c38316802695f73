use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
};

use non_empty_string::NonEmptyString;

/// The exact number of characters in a trimmed campus ID.
pub const CAMPUS_ID_LEN: usize = 10;

/// Emails must be strictly shorter than this many characters.
const MAX_EMAIL_LEN: usize = 40;

/// A validated campus ID.
///
/// The stored value is the trimmed form of the input, which is always exactly
/// [`CAMPUS_ID_LEN`] characters long. Digits are not required.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CampusId(NonEmptyString);

impl CampusId {
    /// Creates a new `CampusId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidFields`] if the trimmed input is not
    /// exactly [`CAMPUS_ID_LEN`] characters long.
    pub fn new(s: &str) -> Result<Self, FormatError> {
        if !is_valid_campus_id(s) {
            return Err(FormatError::InvalidFields);
        }
        NonEmptyString::new(s.trim().to_string())
            .map(Self)
            .map_err(|_| FormatError::InvalidFields)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CampusId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for CampusId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for CampusId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised when a student record (or a persisted line describing one)
/// is malformed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    /// One or more of the name, email, or campus ID failed validation.
    #[error("bad name, email, or campusID")]
    InvalidFields,

    /// A persisted line did not split into exactly four fields.
    #[error("expected 4 fields separated by \", \" but found {found} in '{line}'")]
    FieldCount {
        /// The offending line, trimmed.
        line: String,
        /// The number of fields actually found.
        found: usize,
    },

    /// The prerequisite field was neither `true` nor `false`.
    #[error("invalid prerequisite value '{0}': expected 'true' or 'false'")]
    Prerequisite(String),
}

/// Returns `true` if the name is not blank.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Returns `true` if the email contains `@` and `.edu`, and is between 0 and
/// 40 characters long (both exclusive).
///
/// No minimum is enforced on the number of characters before the `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let len = email.chars().count();
    email.contains('@') && email.contains(".edu") && len > 0 && len < MAX_EMAIL_LEN
}

/// Returns `true` if the campus ID is exactly [`CAMPUS_ID_LEN`] characters
/// long once leading and trailing whitespace is removed.
#[must_use]
pub fn is_valid_campus_id(campus_id: &str) -> bool {
    campus_id.trim().chars().count() == CAMPUS_ID_LEN
}

/// Parses the textual form of a prerequisite flag.
///
/// Accepts `true` and `false` in any letter case.
///
/// # Errors
///
/// Returns [`FormatError::Prerequisite`] for any other input.
pub fn parse_prerequisite(s: &str) -> Result<bool, FormatError> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(FormatError::Prerequisite(trimmed.to_string()))
    }
}

/// A single student's identity and prerequisite status.
///
/// Records are validated on construction and immutable afterwards. Two
/// records are equal (and hash identically) if and only if they share a
/// campus ID; the other fields play no part in identity.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    name: NonEmptyString,
    email: String,
    campus_id: CampusId,
    prerequisite_satisfied: bool,
}

impl StudentRecord {
    /// Creates a new student record.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidFields`] if the name is blank, the email
    /// is invalid, or the campus ID is not 10 characters long.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        campus_id: &str,
        prerequisite_satisfied: bool,
    ) -> Result<Self, FormatError> {
        let name = name.into();
        let email = email.into();

        if !is_valid_name(&name) || !is_valid_email(&email) || !is_valid_campus_id(campus_id) {
            return Err(FormatError::InvalidFields);
        }

        let name = NonEmptyString::new(name).map_err(|_| FormatError::InvalidFields)?;
        let campus_id = CampusId::new(campus_id)?;

        Ok(Self {
            name,
            email,
            campus_id,
            prerequisite_satisfied,
        })
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The student's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The student's campus ID.
    #[must_use]
    pub const fn campus_id(&self) -> &CampusId {
        &self.campus_id
    }

    /// Whether the student has satisfied the course prerequisites.
    #[must_use]
    pub const fn is_prerequisite_satisfied(&self) -> bool {
        self.prerequisite_satisfied
    }

    /// The identity key used for equality, hashing and lookup.
    #[must_use]
    pub fn key(&self) -> &str {
        self.campus_id.as_str()
    }
}

impl PartialEq for StudentRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for StudentRecord {}

impl Hash for StudentRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Canonical text form: `name, email, campusID, prerequisiteSatisfied`.
impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.name, self.email, self.campus_id, self.prerequisite_satisfied
        )
    }
}
