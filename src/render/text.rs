//! Plain text rendering of parsed entries.

use crate::model::{BulletinEntry, ParsedEntry};

use super::RenderOptions;

/// Marker appended to truncated text.
const ELLIPSIS: char = '…';

/// One-line summary of an entry.
///
/// Incorporations render as `<nombre> — Constitución`; anything else falls
/// back to the raw body cut at `max_chars` characters (0 = no cut).
pub fn summary_line(parsed: &ParsedEntry, max_chars: usize) -> String {
    match parsed
        .incorporation
        .as_ref()
        .and_then(|fields| fields.nombre.as_deref())
    {
        Some(nombre) => format!("{}: {} — Constitución", parsed.entry.id, nombre),
        None => format!(
            "{}: {}",
            parsed.entry.id,
            truncate(&parsed.entry.text, max_chars)
        ),
    }
}

/// Cut text at `max_chars` characters, on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.to_string();
    }
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            let mut cut = text[..idx].trim_end().to_string();
            cut.push(ELLIPSIS);
            cut
        }
        None => text.to_string(),
    }
}

/// Render parsed entries as plain text, one block per entry.
pub fn to_text(entries: &[ParsedEntry], options: &RenderOptions) -> String {
    let mut output = String::new();

    for parsed in entries {
        match &parsed.incorporation {
            Some(fields) => {
                output.push_str(&format!(
                    "{} - {}\n",
                    parsed.entry.id,
                    fields.nombre.as_deref().unwrap_or("(sin nombre)")
                ));
                for (label, value) in fields.labeled() {
                    output.push_str(&format!("    {}: {}\n", label, value));
                }
                if options.include_raw_text {
                    output.push_str(&format!("    Texto: {}\n", parsed.entry.text));
                }
            }
            None => {
                output.push_str(&format!(
                    "{} - {}\n",
                    parsed.entry.id,
                    truncate(&parsed.entry.text, options.summary_width)
                ));
            }
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

/// Render raw entries, one `<id> - <text>` line each.
pub fn entries_to_lines(entries: &[BulletinEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} - {}", entry.id, entry.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompanyIncorporationFields;

    fn raw(id: &str, text: &str) -> ParsedEntry {
        ParsedEntry {
            entry: BulletinEntry::new(id, text).unwrap(),
            incorporation: None,
        }
    }

    fn incorporation() -> ParsedEntry {
        ParsedEntry {
            entry: BulletinEntry::new("1", "Acme SL. Constitución. Capital: 3000 euros").unwrap(),
            incorporation: Some(CompanyIncorporationFields {
                nombre: Some("Acme SL.".into()),
                capital: Some("3000 euros".into()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("Disolución voluntaria", 9), "Disolució…");
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("sin límite", 0), "sin límite");
    }

    #[test]
    fn test_truncate_trims_before_ellipsis() {
        assert_eq!(truncate("Acme SL. Ceses", 9), "Acme SL.…");
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&incorporation(), 10),
            "1: Acme SL. — Constitución"
        );
        assert_eq!(
            summary_line(&raw("2", "Beta SA. Disolución."), 8),
            "2: Beta SA.…"
        );
    }

    #[test]
    fn test_to_text_structured_and_raw() {
        let text = to_text(
            &[incorporation(), raw("2", "Beta SA. Disolución.")],
            &RenderOptions::default(),
        );
        assert!(text.contains("1 - Acme SL.\n    Capital: 3000 euros"));
        assert!(text.contains("2 - Beta SA. Disolución."));
        assert!(!text.contains("Texto:"));
    }

    #[test]
    fn test_to_text_with_raw_text() {
        let text = to_text(&[incorporation()], &RenderOptions::new().with_raw_text(true));
        assert!(text.contains("Texto: Acme SL. Constitución."));
    }

    #[test]
    fn test_entries_to_lines() {
        let entries = vec![
            BulletinEntry::new("1", "uno").unwrap(),
            BulletinEntry::new("2", "dos").unwrap(),
        ];
        assert_eq!(entries_to_lines(&entries), "1 - uno\n2 - dos");
    }
}
