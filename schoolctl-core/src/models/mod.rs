//! Domain models with validation at construction
//!
//! Request bodies deserialize into `*Input` types and are turned into
//! validated `New*` values before they reach persistence.
//! Invalid input returns ValidationError, not panic.

pub mod attendance;
pub mod course;
pub mod fields;
pub mod grade;
pub mod person;
pub mod student;
pub mod summary;
pub mod teacher;
pub mod user;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use attendance::{Attendance, AttendanceInput, AttendanceListing, AttendanceStatus, NewAttendance};
pub use course::{Course, CourseInput, CourseListing, NewCourse};
pub use fields::Email;
pub use grade::{Grade, GradeInput, GradeListing, NewGrade};
pub use person::PersonFields;
pub use student::{NewStudent, Student, StudentInput};
pub use summary::{AttendanceDay, CourseAverage, DashboardSummary, SummaryTotals};
pub use teacher::{NewTeacher, Teacher, TeacherInput};
pub use user::{ChangePasswordRequest, LoginRequest, LoginResponse, UserProfile, DEFAULT_ROLE};
pub use validation::ValidationError;

/// Plain `{"message": ...}` body used for deletes and errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
