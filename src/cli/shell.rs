//! The interactive command loop.
//!
//! Each input line is split on whitespace and parsed as a [`Command`]. The
//! shell owns all user-facing text; the library only reports outcomes and
//! errors.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use clap::{ArgAction, Parser};
use enrollment::{
    domain::student::parse_prerequisite, Config, CourseEnrollment, Enrollment, StudentRecord,
};
use tracing::instrument;

use crate::cli::{session::Session, terminal::Palette};

const WELCOME: &str = "--- Welcome to the Course Enrollment System! ---";
const GOODBYE: &str = "--- Bye! Thanks for using the app. ---";
const PROMPT: &str = "ENTER COMMAND: ";

const MENU: &str = "\
================================ MENU ================================
create <name> <enrollment-capacity> <waitlist-capacity>  Create a course
enroll <name> <email> <campus-id> <true|false>           Enroll a student
waitlist <name> <email> <campus-id> <true|false>         Waitlist a student
drop <campus-id>                                         Drop a student
switch <index>                                           Switch course
roster                                                   Print the roster
show-waitlist                                            Print the waitlist
expand <amount>                                          Expand capacity
save [path]                                              Save the roster
load [path]                                              Load a roster
courses                                                  Print all courses
exit                                                     Exit
----------------------------------------------------------------------";

/// One line of shell input.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Create a new course enrollment and make it active
    Create {
        name: String,
        enrollment_capacity: usize,
        waitlist_capacity: usize,
    },

    /// Enroll a student in the active course
    Enroll(StudentArgs),

    /// Add a student to the active course's waitlist
    Waitlist(StudentArgs),

    /// Drop a student from the active course
    Drop { campus_id: String },

    /// Switch to controlling the course at the given index
    Switch { index: usize },

    /// Print the active course's roster
    Roster,

    /// Print the active course's waitlist
    ShowWaitlist,

    /// Increase the active course's enrollment capacity
    Expand { amount: usize },

    /// Save the active course's roster
    Save { path: Option<PathBuf> },

    /// Enroll the students listed in a roster file
    Load { path: Option<PathBuf> },

    /// Print every course enrollment
    Courses,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, clap::Args)]
struct StudentArgs {
    name: String,
    email: String,
    campus_id: String,

    /// Whether the course prerequisites are satisfied
    #[arg(action = ArgAction::Set, value_parser = parse_prerequisite_arg)]
    prerequisite: bool,
}

impl StudentArgs {
    fn into_record(self) -> anyhow::Result<StudentRecord> {
        Ok(StudentRecord::new(
            self.name,
            self.email,
            &self.campus_id,
            self.prerequisite,
        )?)
    }
}

fn parse_prerequisite_arg(s: &str) -> Result<bool, String> {
    parse_prerequisite(s).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Shell<W> {
    session: Session,
    config: Config,
    palette: Palette,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(config: Config, palette: Palette, out: W) -> Self {
        Self {
            session: Session::default(),
            config,
            palette,
            out,
        }
    }

    /// Reads and executes commands until `exit` or end of input.
    ///
    /// Command failures are reported to the output and the loop carries on.
    /// Only failures to read input or write output end the loop early.
    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        writeln!(self.out, "{}", self.palette.info(WELCOME))?;

        let mut lines = input.lines();
        loop {
            if self.config.show_menu {
                writeln!(self.out, "\n{}", self.palette.dim(MENU))?;
            }
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(self.out)?;
                break;
            };

            if self.handle_line(&line)? == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "{}", self.palette.info(GOODBYE))?;
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let command = match Line::try_parse_from(line.split_whitespace()) {
            Ok(Line { command }) => command,
            Err(e) => {
                // clap renders help and usage errors alike
                write!(self.out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match self.execute(command) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                tracing::debug!("command failed: {e:#}");
                let message = format!("Error: {e:#}");
                writeln!(self.out, "{}", self.palette.warning(&message))?;
                Ok(Flow::Continue)
            }
        }
    }

    #[instrument(skip(self))]
    fn execute(&mut self, command: Command) -> anyhow::Result<Flow> {
        match command {
            Command::Create {
                name,
                enrollment_capacity,
                waitlist_capacity,
            } => {
                let course = CourseEnrollment::new(name, enrollment_capacity, waitlist_capacity)?;
                let index = self.session.courses().len();
                let course = self.session.add(course);
                let message = format!("Created course enrollment {} [{index}]", course.name());
                writeln!(self.out, "{}", self.palette.success(&message))?;
            }
            Command::Enroll(args) => {
                let student = args.into_record()?;
                let name = student.name().to_string();
                let course = self.session.active_mut()?;
                let message = match course.enroll_one(student)? {
                    Enrollment::Direct => {
                        format!("{name} was successfully enrolled in {}.", course.name())
                    }
                    Enrollment::FromWaitlist => format!(
                        "{name} was moved from the waitlist and enrolled in {}.",
                        course.name()
                    ),
                };
                writeln!(self.out, "{}", self.palette.success(&message))?;
            }
            Command::Waitlist(args) => {
                let student = args.into_record()?;
                let name = student.name().to_string();
                let course = self.session.active_mut()?;
                course.add_to_waitlist(student)?;
                let message = format!("{name} was successfully added to the waitlist.");
                writeln!(self.out, "{}", self.palette.success(&message))?;
            }
            Command::Drop { campus_id } => {
                let course = self.session.active_mut()?;
                let roster = course.copy_roster();
                let student = CourseEnrollment::search_by_id(&campus_id, &roster)?;
                let removed = course.drop_student(student)?;
                let message = format!("{} was dropped from {}.", removed.name(), course.name());
                writeln!(self.out, "{}", self.palette.success(&message))?;
            }
            Command::Switch { index } => {
                let course = self.session.switch(index)?;
                writeln!(self.out, "Switched to course {}", course.name())?;
            }
            Command::Roster => {
                let course = self.session.active()?;
                writeln!(self.out, "{course}")?;
            }
            Command::ShowWaitlist => {
                let course = self.session.active()?;
                writeln!(self.out, "{}", course.waitlist_report())?;
            }
            Command::Expand { amount } => {
                let course = self.session.active_mut()?;
                course.expand_capacity(amount)?;
                let message = format!(
                    "Enrollment capacity of {} is now {}.",
                    course.name(),
                    course.enrollment_capacity()
                );
                writeln!(self.out, "{}", self.palette.success(&message))?;
            }
            Command::Save { path } => {
                let path = path.unwrap_or_else(|| self.config.roster_file().to_path_buf());
                let course = self.session.active()?;
                course.save_roster(&path)?;
                let message = format!("Saved roster to {}", path.display());
                writeln!(self.out, "{}", self.palette.success(&message))?;
            }
            Command::Load { path } => {
                let path = path.unwrap_or_else(|| self.config.roster_file().to_path_buf());
                let course = self.session.active_mut()?;
                let report = course.load_roster(&path)?;
                let message = format!(
                    "Loaded {} student(s) from {}",
                    report.enrolled(),
                    path.display()
                );
                writeln!(self.out, "{}", self.palette.success(&message))?;
                for rejected in report.rejected() {
                    let message = format!("  skipped {rejected}");
                    writeln!(self.out, "{}", self.palette.warning(&message))?;
                }
            }
            Command::Courses => {
                for (index, course) in self.session.courses().iter().enumerate() {
                    writeln!(self.out, "[{index}] {course}\n")?;
                }
            }
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}
