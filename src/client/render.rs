//! Plain-text rendering of the task list.

use super::editor::DESCRIPTION_PLACEHOLDER;
use super::ordering::display_order;
use crate::api::TaskDto;

/// Heading shown when there are no tasks.
pub const EMPTY_HEADING: &str = "No tasks yet";

/// Hint shown under [`EMPTY_HEADING`].
pub const EMPTY_HINT: &str = "Get started by adding your first task";

/// Renders one task as a card.
///
/// ```text
/// [x] #4 Deploy to production
///     Roll out the release with a rollback plan prepared
/// ```
#[must_use]
pub fn render_card(task: &TaskDto) -> String {
    let marker = if task.is_completed { "[x]" } else { "[ ]" };
    let description = match task.description.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => DESCRIPTION_PLACEHOLDER,
    };
    let body = description
        .lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{marker} #{} {}\n{body}", task.id, task.title)
}

/// Renders the whole list in display order, or the empty state.
#[must_use]
pub fn render_task_list(tasks: &[TaskDto]) -> String {
    if tasks.is_empty() {
        return format!("{EMPTY_HEADING}\n{EMPTY_HINT}");
    }
    display_order(tasks)
        .into_iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}
