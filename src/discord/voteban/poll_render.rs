// Poll message rendering and button ids.

use crate::core::voteban::PollView;
use poise::serenity_prelude as serenity;

pub const BAN_BUTTON_ID: &str = "voteban:ban";
pub const KEEP_BUTTON_ID: &str = "voteban:keep";

/// Map a button custom id to a vote direction. `None` for buttons we don't own.
pub fn parse_vote(custom_id: &str) -> Option<bool> {
    match custom_id {
        BAN_BUTTON_ID => Some(true),
        KEEP_BUTTON_ID => Some(false),
        _ => None,
    }
}

fn names(list: &[String]) -> String {
    if list.is_empty() {
        "-".to_string()
    } else {
        list.join(", ")
    }
}

pub fn poll_content(view: &PollView) -> String {
    let tally = &view.tally;
    format!(
        "🗳️ **Voteban** against **{}**, started by {} <t:{}:R>\n\
         {} votes on either side decide.\n\n\
         ✅ Ban ({}): {}\n\
         ❌ Keep ({}): {}",
        view.target_label,
        view.initiator_label,
        view.opened_at.timestamp(),
        tally.threshold,
        tally.ban_count(),
        names(&tally.ban_voters),
        tally.keep_count(),
        names(&tally.keep_voters),
    )
}

pub fn poll_buttons(view: &PollView) -> Vec<serenity::CreateActionRow> {
    let tally = &view.tally;
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(BAN_BUTTON_ID)
            .label(format!("Ban ({}/{})", tally.ban_count(), tally.threshold))
            .style(serenity::ButtonStyle::Danger),
        serenity::CreateButton::new(KEEP_BUTTON_ID)
            .label(format!("Keep ({}/{})", tally.keep_count(), tally.threshold))
            .style(serenity::ButtonStyle::Secondary),
    ])]
}
