use serde::{Deserialize, Serialize};

/// Opaque identifier for a tag, assigned monotonically by the form state.
///
/// Labels carry no uniqueness constraint, so removal targets ids, never
/// labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagId(pub(crate) u64);

/// One user-entered skill, scoped to a section ("technical", "soft", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTag {
    pub id: TagId,
    pub skill_type: String,
    pub label: String,
}

impl SkillTag {
    /// Name of the hidden field this tag submits, e.g. "technical_skills[]".
    pub fn field_name(&self) -> String {
        format!("{}_skills[]", self.skill_type)
    }

    /// Id of the container element this tag renders into.
    pub fn container_id(skill_type: &str) -> String {
        format!("{skill_type}-skills-container")
    }

    pub fn display_text(&self) -> &str {
        &self.label
    }

    /// Derive the tag markup: visible label, hidden submission field, and
    /// a remove control.
    pub fn render_html(&self) -> String {
        format!(
            "<span class=\"skill-tag\">{}<input type=\"hidden\" name=\"{}\" value=\"{}\"><button type=\"button\" class=\"remove-skill\">&times;</button></span>",
            escape_html(&self.label),
            escape_html(&self.field_name()),
            escape_html(&self.label),
        )
    }
}

/// One user-entered language with a proficiency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTag {
    pub id: TagId,
    pub name: String,
    pub level: String,
}

impl LanguageTag {
    pub fn container_id() -> &'static str {
        "languages-container"
    }

    /// Visible text, e.g. "French (B2)".
    pub fn display_text(&self) -> String {
        format!("{} ({})", self.name, self.level)
    }

    /// Derive the tag markup: visible text, both hidden submission fields,
    /// and a remove control.
    pub fn render_html(&self) -> String {
        format!(
            "<span class=\"language-tag\">{}<input type=\"hidden\" name=\"language_name[]\" value=\"{}\"><input type=\"hidden\" name=\"language_level[]\" value=\"{}\"><button type=\"button\" class=\"remove-skill\">&times;</button></span>",
            escape_html(&self.display_text()),
            escape_html(&self.name),
            escape_html(&self.level),
        )
    }
}

/// Minimal HTML escaping for text and attribute positions.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
