//! Splits a generated recipe write-up into ingredients, tools and steps.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInstructions {
    pub ingredients: Vec<String>,
    pub tools: Vec<String>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Ingredients,
    Tools,
    Instructions,
}

/// Headers are recognised in markdown (`**Ingredients:**`, `### Ingredients`)
/// and plain (`Ingredients:`) form. When no section yields anything, every
/// non-empty line is returned as a step.
pub fn parse_instructions(text: &str) -> ParsedInstructions {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut parsed = ParsedInstructions::default();
    let mut section = Section::None;

    for line in &lines {
        if let Some(header) = section_header(&line.to_lowercase()) {
            section = header;
            continue;
        }

        match section {
            Section::Ingredients if is_bullet(line) => parsed.ingredients.push(strip_dash(line)),
            Section::Tools if is_bullet(line) => parsed.tools.push(strip_dash(line)),
            Section::Instructions if is_step(line) => parsed.steps.push(line.to_string()),
            _ => {}
        }
    }

    if parsed.ingredients.is_empty() && parsed.tools.is_empty() && parsed.steps.is_empty() {
        parsed.steps = lines.into_iter().map(String::from).collect();
    }

    parsed
}

fn section_header(lower: &str) -> Option<Section> {
    if lower.contains("**ingredients:**")
        || lower.contains("### ingredients")
        || lower.starts_with("ingredients:")
    {
        Some(Section::Ingredients)
    } else if lower.contains("**tools needed:**")
        || lower.contains("### tools needed")
        || lower.starts_with("tools needed:")
        || lower.starts_with("tools:")
    {
        Some(Section::Tools)
    } else if lower.contains("**instructions:**")
        || lower.contains("### instructions")
        || lower.starts_with("instructions:")
        || lower.starts_with("directions:")
    {
        Some(Section::Instructions)
    } else {
        None
    }
}

fn is_bullet(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•')
}

/// Numbered (`1.`) or dashed lines.
fn is_step(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    (digits > 0 && line[digits..].starts_with('.')) || line.starts_with('-')
}

fn strip_dash(line: &str) -> String {
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .unwrap_or(line)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_sections() {
        let text = "### Veggie Omelette

**Ingredients:**
- 3 eggs
- 1 cup spinach

**Tools Needed:**
• Non-stick pan
• Whisk

**Instructions:**
1. Whisk the eggs.
2. Add spinach and cook for 3 minutes.
Enjoy!";

        let parsed = parse_instructions(text);
        assert_eq!(parsed.ingredients, vec!["3 eggs", "1 cup spinach"]);
        assert_eq!(parsed.tools, vec!["Non-stick pan", "Whisk"]);
        assert_eq!(
            parsed.steps,
            vec!["1. Whisk the eggs.", "2. Add spinach and cook for 3 minutes."]
        );
    }

    #[test]
    fn test_plain_headers() {
        let text = "Ingredients:\n- Rice\nDirections:\n- Rinse the rice\n10. Serve";
        let parsed = parse_instructions(text);
        assert_eq!(parsed.ingredients, vec!["Rice"]);
        assert!(parsed.tools.is_empty());
        assert_eq!(parsed.steps, vec!["- Rinse the rice", "10. Serve"]);
    }

    #[test]
    fn test_unstructured_text_becomes_steps() {
        let text = "Boil water.\n\n  Add pasta.  \nDrain and serve.";
        let parsed = parse_instructions(text);
        assert!(parsed.ingredients.is_empty());
        assert!(parsed.tools.is_empty());
        assert_eq!(parsed.steps, vec!["Boil water.", "Add pasta.", "Drain and serve."]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_instructions(""), ParsedInstructions::default());
    }

    #[test]
    fn test_is_step() {
        assert!(is_step("1. Mix"));
        assert!(is_step("12.Mix"));
        assert!(is_step("- Mix"));
        assert!(!is_step("1) Mix"));
        assert!(!is_step("Mix"));
    }
}
