//! Detail pane rendering.

use std::sync::LazyLock;

use regex_lite::Regex;

use grc_domain::Action;

// Compiled regex for `[PDF: B123]` page references
static PDF_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[PDF:\s*([^\]]+)\]").expect("valid regex"));

const EMPTY_DETAIL: &str = r#"<div id="grc-content-empty">Select an action to view details</div>"#;

const SEND_TO_CHAT_FOOTER: &str = concat!(
    r#"<div id="grc-content-footer">"#,
    r#"<button id="grc-send-chat-btn" type="button"><i class="fas fa-comment"></i> Send to Chat</button>"#,
    "</div>"
);

/// Icons in the detail pane's top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Attack,
    Dodge,
    Block,
    Parry,
    Movement,
}

impl IconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Dodge => "dodge",
            Self::Block => "block",
            Self::Parry => "parry",
            Self::Movement => "movement",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Self::Attack => "/systems/gurps/icons/maneuvers/man-attack.png",
            Self::Dodge => "modules/gurps-rules-companion/icons/dodge.png",
            Self::Block => "/systems/gurps/icons/maneuvers/man-defense.png",
            Self::Parry => "/systems/gurps/icons/maneuvers/man-allout-attack.png",
            Self::Movement => "modules/gurps-rules-companion/icons/move.png",
        }
    }

    fn render(&self, active: bool) -> String {
        let state = if active {
            "grc-icon-active"
        } else {
            "grc-icon-inactive"
        };
        format!(
            r#"<img src="{}" alt="{}" class="grc-icon {state}" />"#,
            self.url(),
            self.as_str()
        )
    }
}

/// Wrap every `[PDF: X]` in a clickable span the host resolves to a page.
pub fn process_pdf_links(text: &str) -> String {
    PDF_REF_RE
        .replace_all(text, r#"<span class="pdflink" data-original-pageref="$1">$1</span>"#)
        .into_owned()
}

/// HTML for the detail pane. `None` renders the empty placeholder.
pub fn render_action_detail(action: Option<&Action>) -> String {
    let Some(action) = action else {
        return EMPTY_DETAIL.to_string();
    };

    if action.special {
        format!(
            r#"<div id="grc-content-display" class="grc-special-content"><div id="grc-content-body">{}{}</div>{}</div>"#,
            reference_field(action),
            description_field(action),
            SEND_TO_CHAT_FOOTER
        )
    } else {
        format!(
            r#"<div id="grc-content-display"><div id="grc-content-body">{}{}{}{}</div>{}</div>"#,
            icons_row(action),
            movement_field(action),
            reference_field(action),
            description_field(action),
            SEND_TO_CHAT_FOOTER
        )
    }
}

fn icons_row(action: &Action) -> String {
    let defenses = action.defenses.unwrap_or_default();
    let icons = [
        IconKind::Attack.render(action.attack),
        IconKind::Dodge.render(defenses.dodge),
        IconKind::Block.render(defenses.block),
        IconKind::Parry.render(defenses.parry),
        IconKind::Movement.render(action.has_movement()),
    ];
    format!(r#"<div id="grc-icons-row">{}</div>"#, icons.concat())
}

fn field(label: &str, value: &str) -> String {
    format!(
        r#"<div id="grc-content-field"><span id="grc-content-label">{label}:</span><span id="grc-content-value">{value}</span></div>"#
    )
}

fn movement_field(action: &Action) -> String {
    action
        .movement
        .as_ref()
        .and_then(|m| m.display_descriptor())
        .map(|descriptor| field("Movement", descriptor))
        .unwrap_or_default()
}

fn reference_field(action: &Action) -> String {
    action
        .reference
        .as_deref()
        .filter(|r| !r.is_empty())
        .map(|r| field("Reference", &process_pdf_links(r)))
        .unwrap_or_default()
}

/// Notes are the description shown to players; `description` is the fallback.
fn description_field(action: &Action) -> String {
    action
        .notes
        .as_deref()
        .or(action.description.as_deref())
        .filter(|text| !text.is_empty())
        .map(|text| {
            format!(
                r#"<div id="grc-content-field-notes"><span id="grc-content-label">Description:</span><p id="grc-content-notes">{}</p></div>"#,
                process_pdf_links(text)
            )
        })
        .unwrap_or_default()
}
