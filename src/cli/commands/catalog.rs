//! Read-only listings: users, projects, sprints.

use anyhow::Result;

use super::print_json;
use crate::cli::Session;
use crate::format::pad_to_width;

/// Execute the users command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn users(session: &Session) -> Result<()> {
    let users = session.store.users();
    if session.json {
        return print_json(users);
    }
    for user in users {
        println!(
            "{} {} {} <{}>",
            pad_to_width(&user.id, 3),
            pad_to_width(&user.initials, 3),
            pad_to_width(&user.name, 16),
            user.email
        );
    }
    println!("\n{} user(s)", users.len());
    Ok(())
}

/// Execute the projects command. The current project is starred.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn projects(session: &Session) -> Result<()> {
    let projects = session.store.projects();
    if session.json {
        return print_json(projects);
    }
    let current = session.store.current_project().map(|p| p.id.as_str());
    for project in projects {
        let marker = if current == Some(project.id.as_str()) { "*" } else { " " };
        println!("{marker} {} {} {}", project.avatar, project.key, project.name);
        if let Some(description) = &project.description {
            println!("    {description}");
        }
    }
    Ok(())
}

/// Execute the sprints command. The current sprint is starred.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn sprints(session: &Session) -> Result<()> {
    let sprints = session.store.sprints();
    if session.json {
        return print_json(sprints);
    }
    let current = session.store.current_sprint().map(|s| s.id.as_str());
    for sprint in sprints {
        let marker = if current == Some(sprint.id.as_str()) { "*" } else { " " };
        println!(
            "{marker} {} [{}] {} → {} ({} issue(s))",
            sprint.name,
            sprint.status,
            sprint.start_date.format("%Y-%m-%d"),
            sprint.end_date.format("%Y-%m-%d"),
            session.store.sprint_issue_ids(&sprint.id).len()
        );
    }
    Ok(())
}
