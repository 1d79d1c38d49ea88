// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Method handlers.
//!
//! Each handler pulls typed parameters out of the request, calls exactly
//! one store operation, and shapes the payload. Errors propagate as
//! [`Failure`] values; nothing here writes to the output stream.

use exec_core::{Config, NewTask, Priority, Store};
use exec_ipc::{
    Failure, Params, Payload, ReminderCreated, ReminderList, SearchResults, TaskCreated, TaskList,
};

/// Result type shared by every handler.
pub type HandlerResult = Result<Payload, Failure>;

/// `take_note { content }`
pub fn take_note(store: &mut Store, _config: &Config, params: &Params) -> HandlerResult {
    let content = params.required_str("content")?;
    store.append_note(content)?;
    Ok(Payload::message(format!(
        "Note saved to {}",
        store.note_log().path().display()
    )))
}

/// `search_notes { query, limit? }`
pub fn search_notes(store: &mut Store, config: &Config, params: &Params) -> HandlerResult {
    let query = params.required_str("query")?;
    let limit = params
        .optional_usize("limit")?
        .unwrap_or(config.search_limit);

    let results = store.search_notes(query, limit)?;
    Ok(Payload::SearchResults(SearchResults { results }))
}

/// `create_task { title, description?, priority? }`
pub fn create_task(store: &mut Store, _config: &Config, params: &Params) -> HandlerResult {
    let title = params.required_str("title")?;
    let mut task = NewTask::new(title).with_priority(
        params
            .optional_parse::<Priority>("priority")?
            .unwrap_or_default(),
    );
    if let Some(description) = params.optional_str("description")? {
        task = task.with_description(description);
    }

    let id = store.create_task(&task)?;
    Ok(Payload::TaskCreated(TaskCreated {
        message: format!("Task created: {} (ID: {})", task.title, id),
        id,
    }))
}

/// `list_tasks {}`
pub fn list_tasks(store: &mut Store, _config: &Config, _params: &Params) -> HandlerResult {
    let tasks = store.list_pending_tasks()?;
    Ok(Payload::TaskList(TaskList {
        tasks: tasks.into_iter().map(Into::into).collect(),
    }))
}

/// `complete_task { task_id }`
pub fn complete_task(store: &mut Store, _config: &Config, params: &Params) -> HandlerResult {
    let id = params.required_i64("task_id")?;
    store.complete_task(id)?;
    Ok(Payload::Ack)
}

/// `create_reminder { title, minutes? }`
pub fn create_reminder(store: &mut Store, config: &Config, params: &Params) -> HandlerResult {
    let title = params.required_str("title")?;
    let minutes = params
        .optional_i64("minutes")?
        .unwrap_or(config.default_reminder_minutes);

    let reminder = store.create_reminder(title, minutes)?;
    Ok(Payload::ReminderCreated(ReminderCreated {
        message: format!("Reminder set for {} minutes: {}", minutes, reminder.title),
        id: reminder.id,
        trigger_time: reminder.trigger_time,
    }))
}

/// `list_reminders {}`
pub fn list_reminders(store: &mut Store, _config: &Config, _params: &Params) -> HandlerResult {
    let reminders = store.list_active_reminders()?;
    Ok(Payload::ReminderList(ReminderList {
        reminders: reminders.into_iter().map(Into::into).collect(),
    }))
}

/// `cancel_reminder { reminder_id }`
pub fn cancel_reminder(store: &mut Store, _config: &Config, params: &Params) -> HandlerResult {
    let id = params.required_i64("reminder_id")?;
    store.cancel_reminder(id)?;
    Ok(Payload::Ack)
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
