//! `postgresql.conf` rendering of a [`TuningResult`].

use std::fmt::Write;

use crate::settings::{SettingValue, TuningResult};

/// True for values postgresql.conf accepts without quotes.
fn is_bare_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn conf_value(value: &SettingValue) -> String {
    match value {
        SettingValue::Text(s) if s.starts_with('\'') && s.ends_with('\'') && s.len() > 1 => {
            s.clone()
        }
        SettingValue::Text(s) if !is_bare_token(s) => format!("'{}'", s.replace('\'', "''")),
        other => other.to_string(),
    }
}

/// Renders warnings as comments followed by one `name = value` line per
/// setting, in name order.
pub fn render_conf(result: &TuningResult) -> String {
    let mut out = String::new();
    for warning in result.warnings.iter() {
        let _ = writeln!(out, "# {warning}");
    }
    if !result.warnings.is_empty() {
        out.push('\n');
    }
    for (name, value) in result.settings.iter() {
        let _ = writeln!(out, "{name} = {}", conf_value(value));
    }
    out
}
