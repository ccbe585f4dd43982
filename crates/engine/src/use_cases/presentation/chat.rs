//! Chat card formatting.

use grc_domain::{format_category_name, Action, Defenses};

/// `"Dodge, Parry"`, or `"None"` when no defense is allowed.
pub fn format_defenses(defenses: Option<&Defenses>) -> String {
    let active = defenses.map(Defenses::active).unwrap_or_default();
    if active.is_empty() {
        "None".to_string()
    } else {
        active.join(", ")
    }
}

/// Movement descriptor and notes, separated by a blank line.
pub fn chat_notes(action: &Action) -> String {
    let movement = action
        .movement
        .as_ref()
        .and_then(|m| m.chat_descriptor())
        .map(|descriptor| format!("Movement: {descriptor}"));

    movement
        .into_iter()
        .chain(action.notes.clone())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("<br><br>")
}

/// HTML card posted to chat for `action`, found under `category`.
pub fn format_action_for_chat(action: &Action, category: &str) -> String {
    let notes = chat_notes(action);
    let notes_line = if notes.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="am-chat-notes"><strong>Notes:</strong> {notes}</div>"#)
    };

    format!(
        concat!(
            r#"<div class="am-chat-message">"#,
            r#"<h3 class="am-chat-title">{name}</h3>"#,
            r#"<div class="am-chat-category"><strong>Category:</strong> {category}</div>"#,
            r#"<div class="am-chat-field"><strong>Attack:</strong> {attack}</div>"#,
            r#"<div class="am-chat-field"><strong>Defenses:</strong> {defenses}</div>"#,
            "{notes}",
            "</div>"
        ),
        name = action.name,
        category = format_category_name(category),
        attack = if action.attack { "Yes" } else { "No" },
        defenses = format_defenses(action.defenses.as_ref()),
        notes = notes_line,
    )
}
