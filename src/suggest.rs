//! Team name suggestions. The engine never depends on these.

use crate::models::Tournament;

/// Produces candidate team names (an AI service, a word list, ...).
pub trait NameSuggester {
    fn suggest_names(&self) -> Vec<String>;
}

/// Fixed list used when no suggestion service is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackNames;

impl NameSuggester for FallbackNames {
    fn suggest_names(&self) -> Vec<String> {
        ["Galácticos FC", "Vila Real", "União da Bola", "Resenha FC", "Atlético Várzea", "Unidos do Bairro"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Suggestions not already taken in `tournament` (case-insensitive), blanks and repeats dropped.
pub fn fresh_names(suggester: &impl NameSuggester, tournament: &Tournament) -> Vec<String> {
    let mut fresh: Vec<String> = Vec::new();
    for name in suggester.suggest_names() {
        let name = name.trim().to_string();
        let taken = tournament.teams.iter().any(|t| t.has_name(&name))
            || fresh.iter().any(|n| n.to_lowercase() == name.to_lowercase());
        if !name.is_empty() && !taken {
            fresh.push(name);
        }
    }
    fresh
}
