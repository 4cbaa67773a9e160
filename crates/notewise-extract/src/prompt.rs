/// Build the extraction prompt for one run.
///
/// Fixed instruction block with the notes text appended; constructed once
/// per run and never mutated afterwards.
pub fn build_prompt(notes: &str) -> String {
    format!(
        r#"You are an AI assistant that extracts structured information from meeting notes.

From the following text, extract:
- Meeting date
- Location
- Attendees
- Key decisions
- Assigned tasks with deadlines

Respond in JSON format only.

Text:
{notes}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_notes_verbatim() {
        let notes = "Weekly sync, 2024-05-01.\nAlice will ship the report by Friday.";
        let prompt = build_prompt(notes);
        assert!(prompt.contains(notes));
    }

    #[test]
    fn prompt_lists_every_field() {
        let prompt = build_prompt("x");
        for field in [
            "Meeting date",
            "Location",
            "Attendees",
            "Key decisions",
            "Assigned tasks with deadlines",
        ] {
            assert!(prompt.contains(field), "missing field: {field}");
        }
        assert!(prompt.contains("Respond in JSON format only."));
    }
}
