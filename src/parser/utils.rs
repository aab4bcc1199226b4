//! Label helpers shared by the Newick reader and writer.
//!
//! Underscores in labels are always literal: they are never turned into
//! spaces when reading, and spaces are only turned into underscores when
//! writing the plain (unquoted) form consumed by the reconstruction tool.

/// Characters with structural meaning in Newick strings.
const STRUCTURAL_CHARS: &[char] = &['(', ')', '[', ']', ',', ':', ';', '\''];

/// Returns `true` if `label` can only be written to a Newick string when quoted.
///
/// # Examples
/// ```
/// # use ancestree::parser::utils::needs_quotes;
/// assert!(!needs_quotes("Porphyrio_hochstetteri"));
/// assert!(needs_quotes("Porphyrio hochstetteri"));
/// assert!(needs_quotes("Pu[ke]ko"));
/// ```
pub fn needs_quotes(label: &str) -> bool {
    label
        .chars()
        .any(|c| c.is_whitespace() || STRUCTURAL_CHARS.contains(&c))
}

/// Escapes a label for use in a Newick string.
///
/// Labels containing whitespace or structural characters are wrapped in
/// single quotes with internal quotes doubled; all other labels are
/// returned unchanged.
///
/// # Examples
/// ```
/// # use ancestree::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Australasian_Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quotes(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

/// Returns the unquoted form of a label, replacing whitespace with `_`,
/// or `None` if the label contains structural characters (including
/// single quotes) and thus cannot be written without quoting.
///
/// # Examples
/// ```
/// # use ancestree::parser::utils::plain_label;
/// assert_eq!(plain_label("Node_12").as_deref(), Some("Node_12"));
/// assert_eq!(plain_label("Swamp hen").as_deref(), Some("Swamp_hen"));
/// assert_eq!(plain_label("Baillon's"), None);
/// assert_eq!(plain_label("a:b"), None);
/// ```
pub fn plain_label(label: &str) -> Option<String> {
    if label.chars().any(|c| STRUCTURAL_CHARS.contains(&c)) {
        return None;
    }

    Some(
        label
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect(),
    )
}
