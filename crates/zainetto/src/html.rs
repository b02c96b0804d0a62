use chrono::{NaiveDate, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::collections::BTreeMap;

use crate::types::Assignment;
use crate::view;

pub fn render_page(assignments: &[Assignment], tip: &str) -> Markup {
    let ordered = view::display_order(assignments);
    let calendar = view::by_deadline_day(assignments);
    let now = Utc::now();
    let open_count = assignments.iter().filter(|a| !a.completed).count();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Zainetto" }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.container {
                    h1 { "Zainetto" }
                    div.stats {
                        span #"open-count" { (open_count) }
                        " open / "
                        span #"total-count" { (assignments.len()) }
                        " total"
                    }
                    (render_add_form())
                    div.assignment-list #"assignment-list" {
                        @if ordered.is_empty() {
                            div.empty-state {
                                p { "No assignments yet. Add your first one above." }
                            }
                        } @else {
                            @for assignment in &ordered {
                                (render_assignment(assignment, now))
                            }
                        }
                    }
                    (render_calendar(&calendar))
                    div.tip-box {
                        div.tip-title { "Study tip" }
                        p { (tip) }
                    }
                }
                script { (PreEscaped(JAVASCRIPT)) }
            }
        }
    }
}

fn render_assignment(assignment: &Assignment, now: chrono::DateTime<Utc>) -> Markup {
    html! {
        div.assignment-item.completed[assignment.completed].overdue[assignment.is_overdue(now)]
            data-id=(assignment.id) {
            input.assignment-checkbox type="checkbox" data-id=(assignment.id)
                checked[assignment.completed];
            div.assignment-content {
                div.assignment-name {
                    (assignment.name)
                    span.assignment-subject { (assignment.subject) }
                }
                div.assignment-deadline {
                    "Due " (assignment.deadline.format("%Y-%m-%d %H:%M"))
                    @if assignment.is_overdue(now) {
                        span.overdue-tag { "overdue" }
                    }
                }
            }
            button.delete-btn data-id=(assignment.id) title="Delete assignment" { "\u{2715}" }
        }
    }
}

fn render_calendar(calendar: &BTreeMap<NaiveDate, Vec<&Assignment>>) -> Markup {
    html! {
        div.calendar #"calendar" {
            h2 { "Calendar" }
            @if calendar.is_empty() {
                div.empty-state {
                    p { "Nothing scheduled." }
                }
            } @else {
                @for (day, items) in calendar {
                    div.calendar-day {
                        div.calendar-date { (day.format("%A %e %B %Y")) }
                        @for item in items {
                            div.calendar-entry.completed[item.completed] {
                                span.calendar-subject { (item.subject) }
                                " " (item.name)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_add_form() -> Markup {
    html! {
        form.add-form #"add-form" {
            input #"add-name" type="text" placeholder="Assignment name" required;
            input #"add-subject" type="text" placeholder="Subject";
            input #"add-deadline" type="datetime-local" required;
            button type="submit" { "Add" }
        }
    }
}

const CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    background: #f6f4ef;
    color: #1f1f1f;
    min-height: 100vh;
    line-height: 1.4;
}

.container {
    max-width: 760px;
    margin: 0 auto;
    padding: 40px 24px 60px;
}

h1 {
    font-weight: 800;
    font-size: 2.4em;
    letter-spacing: -0.02em;
    margin-bottom: 4px;
}

h2 {
    font-size: 1.2em;
    margin-bottom: 16px;
}

.stats {
    color: #6b6b6b;
    font-size: 0.85em;
    margin-bottom: 28px;
}

.add-form {
    display: flex;
    gap: 8px;
    margin-bottom: 32px;
    flex-wrap: wrap;
}

.add-form input {
    padding: 10px 12px;
    border: 1px solid #d8d4ca;
    border-radius: 6px;
    font-size: 0.9em;
    background: #fff;
}

.add-form input[type="text"] {
    flex: 1;
    min-width: 140px;
}

.add-form button {
    padding: 10px 20px;
    border: none;
    border-radius: 6px;
    background: #2f6f4f;
    color: #fff;
    font-weight: 600;
    cursor: pointer;
}

.add-form button:hover {
    background: #3d8a63;
}

.assignment-list {
    display: grid;
    gap: 10px;
    margin-bottom: 48px;
}

.assignment-item {
    display: flex;
    align-items: flex-start;
    gap: 14px;
    padding: 14px 16px;
    background: #fff;
    border: 1px solid #e3dfd5;
    border-radius: 8px;
}

.assignment-item.completed {
    opacity: 0.55;
}

.assignment-item.completed .assignment-name {
    text-decoration: line-through;
}

.assignment-item.overdue {
    border-color: #c94f3d;
}

.assignment-checkbox {
    width: 20px;
    height: 20px;
    min-width: 20px;
    margin-top: 2px;
    cursor: pointer;
    accent-color: #2f6f4f;
}

.assignment-content {
    flex: 1;
}

.assignment-name {
    font-weight: 600;
}

.assignment-subject {
    display: inline-block;
    margin-left: 10px;
    padding: 2px 8px;
    background: #edeae1;
    border-radius: 10px;
    font-size: 0.7em;
    font-weight: 600;
    text-transform: uppercase;
    letter-spacing: 0.05em;
    color: #555;
}

.assignment-deadline {
    color: #6b6b6b;
    font-size: 0.85em;
    margin-top: 4px;
}

.overdue-tag {
    margin-left: 8px;
    color: #c94f3d;
    font-weight: 700;
    text-transform: uppercase;
    font-size: 0.8em;
}

.delete-btn {
    border: none;
    background: none;
    color: #a09a8c;
    font-size: 1em;
    cursor: pointer;
    padding: 4px 6px;
}

.delete-btn:hover {
    color: #c94f3d;
}

.calendar {
    margin-bottom: 48px;
}

.calendar-day {
    padding: 12px 0;
    border-top: 1px solid #e3dfd5;
}

.calendar-date {
    font-weight: 700;
    font-size: 0.85em;
    text-transform: uppercase;
    letter-spacing: 0.08em;
    color: #555;
    margin-bottom: 8px;
}

.calendar-entry {
    padding: 4px 0;
    font-size: 0.9em;
}

.calendar-entry.completed {
    opacity: 0.55;
    text-decoration: line-through;
}

.calendar-subject {
    font-weight: 600;
    color: #2f6f4f;
}

.tip-box {
    padding: 16px;
    background: #fff;
    border: 1px solid #e3dfd5;
    border-left: 4px solid #2f6f4f;
    border-radius: 8px;
    font-size: 0.9em;
}

.tip-title {
    font-weight: 700;
    text-transform: uppercase;
    font-size: 0.75em;
    letter-spacing: 0.08em;
    color: #2f6f4f;
    margin-bottom: 6px;
}

.empty-state {
    padding: 40px 20px;
    text-align: center;
    color: #8a8578;
    font-size: 0.9em;
}
"#;

const JAVASCRIPT: &str = r#"
document.getElementById('add-form').addEventListener('submit', async function (e) {
    e.preventDefault();
    const name = document.getElementById('add-name').value.trim();
    const subject = document.getElementById('add-subject').value.trim();
    const deadline = document.getElementById('add-deadline').value;
    if (!name || !deadline) return;

    await fetch('/api/assignments', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
            name: name,
            subject: subject,
            deadline: new Date(deadline).toISOString(),
        }),
    });
    window.location.reload();
});

document.querySelectorAll('.assignment-checkbox').forEach(checkbox => {
    checkbox.addEventListener('change', async function () {
        const id = this.getAttribute('data-id');
        await fetch(`/api/assignments/${id}/toggle`, { method: 'POST' });
        window.location.reload();
    });
});

document.querySelectorAll('.delete-btn').forEach(button => {
    button.addEventListener('click', async function () {
        const id = this.getAttribute('data-id');
        await fetch(`/api/assignments/${id}`, { method: 'DELETE' });
        window.location.reload();
    });
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssignmentDraft;
    use chrono::DateTime;

    fn make_assignment(name: &str, deadline: &str, completed: bool) -> Assignment {
        let mut assignment = Assignment::from_draft(AssignmentDraft {
            name: name.to_string(),
            subject: "English".to_string(),
            deadline: DateTime::parse_from_rfc3339(deadline)
                .unwrap()
                .with_timezone(&Utc),
        });
        assignment.completed = completed;
        assignment
    }

    #[test]
    fn test_render_empty_page() {
        let page = render_page(&[], "A tip.").into_string();
        assert!(page.contains("No assignments yet"));
        assert!(page.contains("A tip."));
    }

    #[test]
    fn test_render_lists_assignments_in_display_order() {
        let assignments = vec![
            make_assignment("Done", "2025-01-05T00:00:00Z", true),
            make_assignment("Open", "2025-01-10T00:00:00Z", false),
        ];

        let page = render_page(&assignments, "tip").into_string();
        let open_pos = page.find("Open").unwrap();
        let done_pos = page.find("Done").unwrap();
        assert!(open_pos < done_pos);
    }

    #[test]
    fn test_render_escapes_markup_in_names() {
        let assignments = vec![make_assignment(
            "<script>alert(1)</script>",
            "2025-01-10T00:00:00Z",
            false,
        )];

        let page = render_page(&assignments, "tip").into_string();
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_calendar_groups_by_day() {
        let assignments = vec![
            make_assignment("A", "2025-01-10T08:00:00Z", false),
            make_assignment("B", "2025-01-10T17:00:00Z", false),
            make_assignment("C", "2025-01-20T10:00:00Z", false),
        ];

        let page = render_page(&assignments, "tip").into_string();
        assert!(page.contains("10 January 2025"));
        assert!(page.contains("20 January 2025"));
    }
}
