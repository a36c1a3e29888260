use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modifier {
    Control,
    Option,
    Shift,
    Command,
}

impl Modifier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Control => "Ctrl",
            Self::Option => "Option",
            Self::Shift => "Shift",
            Self::Command => "Cmd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub modifiers: Vec<Modifier>,
    pub key: String,
}

impl Display for Hotkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.label())?;
        }
        write!(f, "{}", self.key)
    }
}

pub fn parse_hotkey(input: &str) -> Result<Hotkey, String> {
    let raw_parts: Vec<&str> = input
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    if raw_parts.len() < 2 {
        return Err("Hotkey must include at least one modifier and one key.".to_string());
    }

    let key = normalize_key(raw_parts[raw_parts.len() - 1])?;

    // BTreeSet ordering follows the enum: Ctrl, Option, Shift, Cmd.
    let mut modifiers = BTreeSet::new();
    for part in &raw_parts[..raw_parts.len() - 1] {
        modifiers.insert(normalize_modifier(part)?);
    }

    Ok(Hotkey {
        modifiers: modifiers.into_iter().collect(),
        key,
    })
}

/// Returns the canonical spelling, e.g. `alt+space` becomes `Option+Space`.
pub fn validate_hotkey(input: &str) -> Result<String, String> {
    let canonical = parse_hotkey(input)?.to_string();
    if is_reserved_hotkey(&canonical) {
        return Err(format!(
            "{canonical} is reserved by macOS. Choose a different hotkey."
        ));
    }
    Ok(canonical)
}

fn normalize_modifier(input: &str) -> Result<Modifier, String> {
    match input.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(Modifier::Control),
        "option" | "opt" | "alt" => Ok(Modifier::Option),
        "shift" => Ok(Modifier::Shift),
        "cmd" | "command" | "meta" | "super" => Ok(Modifier::Command),
        _ => Err(format!(
            "Unsupported modifier '{input}'. Use Ctrl, Option, Shift, or Cmd."
        )),
    }
}

fn normalize_key(input: &str) -> Result<String, String> {
    let upper = input.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Err("Hotkey key is required.".to_string());
    }

    if upper == "SPACE" {
        return Ok("Space".to_string());
    }

    if let Some(number) = upper.strip_prefix('F') {
        if let Ok(parsed) = number.parse::<u8>() {
            if (1..=20).contains(&parsed) {
                return Ok(format!("F{parsed}"));
            }
            return Err("Function key must be between F1 and F20.".to_string());
        }
    }

    let mut chars = upper.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Ok(upper);
        }
    }

    Err("Key must be A-Z, 0-9, Space, or F1-F20.".to_string())
}

fn is_reserved_hotkey(canonical: &str) -> bool {
    matches!(
        canonical,
        "Cmd+Space" | "Ctrl+Space" | "Cmd+Tab" | "Cmd+Q" | "Option+Cmd+Space"
    )
}
