//! Commands that talk to a running server
//!
//! ```bash
//! export SCHOOLCTL_TOKEN=$(schoolctl login --email admin@colegio.edu --password admin123)
//! schoolctl list students --json | jq '.[].email'
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum};
use serde::Serialize;

use schoolctl_client::ApiClient;
use schoolctl_core::models::{
    AttendanceListing, CourseListing, DashboardSummary, GradeListing, Student, Teacher,
};

/// Server connection shared by every remote command
#[derive(Args, Debug, Clone)]
pub struct RemoteArgs {
    /// API base URL
    #[arg(long, env = "SCHOOLCTL_SERVER", default_value = "http://127.0.0.1:4000")]
    pub server: String,

    /// Bearer token from `schoolctl login`
    #[arg(long, env = "SCHOOLCTL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Print raw JSON (for piping to jq)
    #[arg(long)]
    pub json: bool,
}

impl RemoteArgs {
    fn client(&self) -> ApiClient {
        let client = ApiClient::new(&self.server);
        match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }
}

#[derive(Parser, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "SCHOOLCTL_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Collection to list
    #[arg(value_enum)]
    pub resource: Resource,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Students,
    Teachers,
    Courses,
    Grades,
    Attendance,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Teachers => "teachers",
            Self::Courses => "courses",
            Self::Grades => "grades",
            Self::Attendance => "attendance",
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Log in and print the token (only the token, so it can be captured).
pub async fn run_login(args: LoginArgs) -> Result<()> {
    let client = args.remote.client();
    let response = client
        .login(&args.email, &args.password)
        .await
        .context("Login failed")?;

    if response.user.must_change_password {
        tracing::warn!("this account still uses its initial password; change it with PUT /auth/password");
    }

    if args.remote.json {
        print_json(&response)
    } else {
        println!("{}", response.token);
        Ok(())
    }
}

pub async fn run_me(args: RemoteArgs) -> Result<()> {
    let me = args.client().me().await.context("Failed to fetch profile")?;

    if args.json {
        return print_json(&me);
    }
    let name = [me.first_name.as_deref(), me.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    println!("{} <{}> [{}]", name, me.email, me.role);
    Ok(())
}

pub async fn run_summary(args: RemoteArgs) -> Result<()> {
    let summary = args
        .client()
        .summary()
        .await
        .context("Failed to fetch summary")?;

    if args.json {
        print_json(&summary)
    } else {
        print!("{}", render_summary(&summary));
        Ok(())
    }
}

fn render_summary(summary: &DashboardSummary) -> String {
    let t = &summary.totals;
    let mut out = format!(
        "Students: {}  Teachers: {}  Courses: {}\nAverage grade: {}  Attendance: {}%\n",
        t.students, t.teachers, t.courses, t.average_grade, t.attendance_rate
    );
    if !summary.grades_per_course.is_empty() {
        out.push_str("\nAverage by course:\n");
        for row in &summary.grades_per_course {
            out.push_str(&format!("  {:<24} {}\n", row.course, row.average));
        }
    }
    if !summary.attendance_trend.is_empty() {
        out.push_str("\nPresent per day:\n");
        for day in &summary.attendance_trend {
            out.push_str(&format!("  {}  {}\n", day.date, day.present));
        }
    }
    out
}

pub async fn run_list(args: ListArgs) -> Result<()> {
    let client = args.remote.client();
    let path = args.resource.path();
    let json = args.remote.json;

    let lines: Vec<String> = match args.resource {
        Resource::Students => {
            let rows: Vec<Student> = client.list(path).await.context("Failed to list students")?;
            if json {
                return print_json(&rows);
            }
            rows.iter()
                .map(|s| format!("{:>5}  {} {}  <{}>  enrolled {}", s.id, s.first_name, s.last_name, s.email, s.enrollment_date))
                .collect()
        }
        Resource::Teachers => {
            let rows: Vec<Teacher> = client.list(path).await.context("Failed to list teachers")?;
            if json {
                return print_json(&rows);
            }
            rows.iter()
                .map(|t| format!("{:>5}  {} {}  <{}>  hired {}", t.id, t.first_name, t.last_name, t.email, t.hire_date))
                .collect()
        }
        Resource::Courses => {
            let rows: Vec<CourseListing> = client.list(path).await.context("Failed to list courses")?;
            if json {
                return print_json(&rows);
            }
            rows.iter()
                .map(|c| {
                    format!(
                        "{:>5}  {}  ({})",
                        c.course.id,
                        c.course.name,
                        c.teacher_name.as_deref().unwrap_or("unassigned")
                    )
                })
                .collect()
        }
        Resource::Grades => {
            let rows: Vec<GradeListing> = client.list(path).await.context("Failed to list grades")?;
            if json {
                return print_json(&rows);
            }
            rows.iter()
                .map(|g| {
                    format!(
                        "{:>5}  {}  {} / {}  {:.2}",
                        g.grade.id,
                        g.grade.grade_date,
                        g.student_name.as_deref().unwrap_or("?"),
                        g.course_name.as_deref().unwrap_or("?"),
                        g.grade.grade
                    )
                })
                .collect()
        }
        Resource::Attendance => {
            let rows: Vec<AttendanceListing> =
                client.list(path).await.context("Failed to list attendance")?;
            if json {
                return print_json(&rows);
            }
            rows.iter()
                .map(|a| {
                    format!(
                        "{:>5}  {}  {} / {}  {}",
                        a.attendance.id,
                        a.attendance.attendance_date,
                        a.student_name.as_deref().unwrap_or("?"),
                        a.course_name.as_deref().unwrap_or("?"),
                        a.attendance.status
                    )
                })
                .collect()
        }
    };

    if lines.is_empty() {
        eprintln!("No {} found", path);
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolctl_core::models::{AttendanceDay, CourseAverage, SummaryTotals};

    #[test]
    fn summary_renders_sections_only_when_present() {
        let mut summary = DashboardSummary {
            totals: SummaryTotals {
                students: 2,
                teachers: 1,
                courses: 1,
                average_grade: "14.50".into(),
                attendance_rate: 75,
            },
            grades_per_course: vec![],
            attendance_trend: vec![],
        };
        let text = render_summary(&summary);
        assert!(text.contains("Average grade: 14.50  Attendance: 75%"));
        assert!(!text.contains("Average by course"));

        summary.grades_per_course.push(CourseAverage {
            course: "Math".into(),
            average: "14.50".into(),
        });
        summary.attendance_trend.push(AttendanceDay {
            date: "2024-03-01".parse().unwrap(),
            present: 3,
        });
        let text = render_summary(&summary);
        assert!(text.contains("Math"));
        assert!(text.contains("2024-03-01  3"));
    }

    #[test]
    fn resource_paths() {
        assert_eq!(Resource::Attendance.path(), "attendance");
        assert_eq!(Resource::Students.path(), "students");
    }
}
