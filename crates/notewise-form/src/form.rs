use serde::{Deserialize, Serialize};

use crate::tag::{LanguageTag, SkillTag, TagId};

/// The set of tags a profile form will submit.
///
/// Tags live here as plain records; hidden fields and markup are derived
/// views. A tag is either present or removed — removal detaches it and its
/// fields permanently, and is the only state transition there is.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProfileFormState {
    tags: Vec<Tag>,
    next_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Tag {
    Skill(SkillTag),
    Language(LanguageTag),
}

impl ProfileFormState {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> TagId {
        let id = TagId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a skill tag from raw input. The label is whitespace-trimmed;
    /// an empty result is silently ignored and returns `None`.
    pub fn add_skill(&mut self, skill_type: &str, raw_label: &str) -> Option<TagId> {
        let label = raw_label.trim();
        if label.is_empty() {
            return None;
        }
        let id = self.next_id();
        self.tags.push(Tag::Skill(SkillTag {
            id,
            skill_type: skill_type.to_string(),
            label: label.to_string(),
        }));
        Some(id)
    }

    /// Add a language tag from raw input. Requires both a non-empty
    /// trimmed name and a chosen level; otherwise a silent no-op.
    pub fn add_language(&mut self, raw_name: &str, raw_level: &str) -> Option<TagId> {
        let name = raw_name.trim();
        let level = raw_level.trim();
        if name.is_empty() || level.is_empty() {
            return None;
        }
        let id = self.next_id();
        self.tags.push(Tag::Language(LanguageTag {
            id,
            name: name.to_string(),
            level: level.to_string(),
        }));
        Some(id)
    }

    /// Remove exactly the tag with this id. Returns `false` when the id is
    /// unknown or already removed; removal is terminal.
    pub fn remove(&mut self, id: TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.id() != id);
        self.tags.len() < before
    }

    /// Skill tags in append order.
    pub fn skills(&self) -> Vec<&SkillTag> {
        self.tags
            .iter()
            .filter_map(|t| match t {
                Tag::Skill(s) => Some(s),
                Tag::Language(_) => None,
            })
            .collect()
    }

    /// Language tags in append order.
    pub fn languages(&self) -> Vec<&LanguageTag> {
        self.tags
            .iter()
            .filter_map(|t| match t {
                Tag::Language(l) => Some(l),
                Tag::Skill(_) => None,
            })
            .collect()
    }

    /// The hidden fields this form would submit, as name/value pairs in
    /// append order. Each skill contributes one pair, each language two.
    pub fn hidden_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        for tag in &self.tags {
            match tag {
                Tag::Skill(s) => fields.push((s.field_name(), s.label.clone())),
                Tag::Language(l) => {
                    fields.push(("language_name[]".into(), l.name.clone()));
                    fields.push(("language_level[]".into(), l.level.clone()));
                }
            }
        }
        fields
    }

    /// Derive the markup for one skill section's container.
    pub fn skills_html(&self, skill_type: &str) -> String {
        self.skills()
            .iter()
            .filter(|s| s.skill_type == skill_type)
            .map(|s| s.render_html())
            .collect()
    }

    /// Derive the markup for the languages container.
    pub fn languages_html(&self) -> String {
        self.languages().iter().map(|l| l.render_html()).collect()
    }

    pub fn count(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Tag {
    fn id(&self) -> TagId {
        match self {
            Tag::Skill(s) => s.id,
            Tag::Language(l) => l.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_skill_trims_and_creates_exactly_one_tag() {
        let mut form = ProfileFormState::new();
        let id = form.add_skill("technical", "  Rust  ");
        assert!(id.is_some());
        assert_eq!(form.count(), 1);
        assert_eq!(
            form.hidden_fields(),
            vec![("technical_skills[]".to_string(), "Rust".to_string())]
        );
    }

    #[test]
    fn empty_or_whitespace_input_adds_nothing() {
        let mut form = ProfileFormState::new();
        assert!(form.add_skill("technical", "").is_none());
        assert!(form.add_skill("technical", "   \t ").is_none());
        assert!(form.add_language("", "B2").is_none());
        assert!(form.add_language("French", "  ").is_none());
        assert!(form.is_empty());
        assert!(form.hidden_fields().is_empty());
    }

    #[test]
    fn language_example_french_b2() {
        let mut form = ProfileFormState::new();
        form.add_language("French", "B2").unwrap();

        assert_eq!(
            form.hidden_fields(),
            vec![
                ("language_name[]".to_string(), "French".to_string()),
                ("language_level[]".to_string(), "B2".to_string()),
            ]
        );
        assert_eq!(form.languages()[0].display_text(), "French (B2)");
        assert!(form.languages_html().contains("French (B2)"));
    }

    #[test]
    fn remove_detaches_exactly_one_tag_even_with_duplicate_labels() {
        let mut form = ProfileFormState::new();
        let first = form.add_skill("technical", "SQL").unwrap();
        let second = form.add_skill("technical", "SQL").unwrap();
        assert_ne!(first, second);

        assert!(form.remove(first));
        assert_eq!(
            form.hidden_fields(),
            vec![("technical_skills[]".to_string(), "SQL".to_string())]
        );
        assert_eq!(form.skills()[0].id, second);
    }

    #[test]
    fn remove_is_terminal() {
        let mut form = ProfileFormState::new();
        let id = form.add_skill("soft", "Mentoring").unwrap();
        assert!(form.remove(id));
        assert!(!form.remove(id));
        assert!(form.is_empty());
    }

    #[test]
    fn remove_leaves_other_tags_fields_intact() {
        let mut form = ProfileFormState::new();
        form.add_skill("technical", "Rust").unwrap();
        let lang = form.add_language("French", "B2").unwrap();
        form.add_skill("soft", "Writing").unwrap();

        assert!(form.remove(lang));
        assert_eq!(
            form.hidden_fields(),
            vec![
                ("technical_skills[]".to_string(), "Rust".to_string()),
                ("soft_skills[]".to_string(), "Writing".to_string()),
            ]
        );
    }

    #[test]
    fn append_order_is_preserved() {
        let mut form = ProfileFormState::new();
        form.add_skill("technical", "Rust");
        form.add_skill("technical", "SQL");
        form.add_skill("technical", "Go");

        let labels: Vec<_> = form.skills().iter().map(|s| s.label.clone()).collect();
        assert_eq!(labels, ["Rust", "SQL", "Go"]);
    }

    #[test]
    fn no_deduplication_and_no_count_limit() {
        let mut form = ProfileFormState::new();
        for _ in 0..100 {
            form.add_skill("technical", "Rust");
        }
        assert_eq!(form.count(), 100);
    }

    #[test]
    fn skills_html_renders_only_the_requested_section() {
        let mut form = ProfileFormState::new();
        form.add_skill("technical", "Rust");
        form.add_skill("soft", "Mentoring");

        let html = form.skills_html("technical");
        assert!(html.contains("Rust"));
        assert!(!html.contains("Mentoring"));
        assert!(html.contains("name=\"technical_skills[]\""));
    }
}
