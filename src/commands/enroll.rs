//! Enrollment commands

use crate::cli::Cli;
use crate::commands::output::{
    mutation_json, output_by_format_result, print_json, print_recalc_human,
};
use obetrack_core::error::Result;
use obetrack_core::model::{CourseId, StudentId};
use obetrack_core::scoring::RecalcEvent;
use obetrack_core::store::Store;

pub fn enroll(cli: &Cli, store: &Store, student: StudentId, course: CourseId) -> Result<()> {
    let created = store.db().enroll(student, course)?;
    let summary = if created {
        store.recalculate(RecalcEvent::EnrollmentCreated { course_id: course })?
    } else {
        None
    };

    let enrollment = serde_json::json!({
        "student_id": student,
        "course_id": course,
        "created": created,
    });

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("enrollment", &enrollment, summary.as_ref())?),
        human => {
            if created {
                println!("Enrolled student {} in course {}", student, course);
                print_recalc_human(cli, summary.as_ref());
            } else {
                println!("Student {} is already enrolled in course {}", student, course);
            }
        }
    )
}

pub fn enroll_bulk(cli: &Cli, store: &Store, course: CourseId, students: &[StudentId]) -> Result<()> {
    let outcome = store.db().enroll_many(course, students)?;
    let summary = store.recalculate(RecalcEvent::BulkEnrollment {
        course_id: course,
        enrolled: outcome.enrolled.len(),
    })?;

    let enrollment = serde_json::json!({
        "course_id": course,
        "enrolled": outcome.enrolled,
        "already_enrolled": outcome.already_enrolled,
    });

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("enrollment", &enrollment, summary.as_ref())?),
        human => {
            println!(
                "Enrolled {} student(s) in course {} ({} already enrolled)",
                outcome.enrolled.len(),
                course,
                outcome.already_enrolled.len()
            );
            if !outcome.enrolled.is_empty() {
                print_recalc_human(cli, summary.as_ref());
            }
        }
    )
}

/// Unenroll and drop the course's contribution from the student's scores
pub fn unenroll(cli: &Cli, store: &Store, student: StudentId, course: CourseId) -> Result<()> {
    store.db().unenroll(student, course)?;
    let summary = store.recalculate(RecalcEvent::EnrollmentDeleted {
        student_id: student,
        course_id: course,
    })?;

    let enrollment = serde_json::json!({
        "student_id": student,
        "course_id": course,
    });

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("enrollment", &enrollment, summary.as_ref())?),
        human => {
            println!("Unenrolled student {} from course {}", student, course);
            print_recalc_human(cli, summary.as_ref());
        }
    )
}
