//! Text rendering for the CLI front end.
//! Renders dashboard configurations and user records as small ASCII tables;
//! `FOODBRIDGE_OUTPUT=json` switches every command to JSON output.

use serde::Serialize;

use crate::api::UserTypeEntry;
use crate::dashboard::DashboardConfig;
use crate::identity::User;

pub fn output_is_json() -> bool {
    std::env::var("FOODBRIDGE_OUTPUT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("failed to encode output: {}", e),
    }
}

pub fn print_user(user: &User) {
    if output_is_json() {
        return print_json(user);
    }
    println!("signed in as:");
    print_table(
        &["id", "email", "type", "name"],
        &[vec![
            user.id.clone(),
            user.email.clone(),
            user.account_type.to_string(),
            user.display_name().to_string(),
        ]],
    );
}

pub fn print_dashboard(config: &DashboardConfig) {
    if output_is_json() {
        return print_json(config);
    }
    println!(
        "{} {} — {}",
        config.welcome.icon, config.welcome.subtitle, config.welcome.description
    );
    println!();

    println!("navigation:");
    let rows: Vec<Vec<String>> = config
        .navigation
        .iter()
        .map(|n| {
            vec![
                if n.is_active { "*".to_string() } else { String::new() },
                format!("{} {}", n.icon, n.label),
                n.target.clone(),
            ]
        })
        .collect();
    print_table(&["", "entry", "target"], &rows);

    println!("stats:");
    let rows: Vec<Vec<String>> = config
        .stats
        .iter()
        .map(|s| vec![format!("{} {}", s.icon, s.label), s.value.clone()])
        .collect();
    print_table(&["stat", "value"], &rows);

    println!("quick actions:");
    let rows: Vec<Vec<String>> = config
        .quick_actions
        .iter()
        .map(|a| vec![format!("{} {}", a.icon, a.label), a.target.clone()])
        .collect();
    print_table(&["action", "target"], &rows);

    println!("recent activity:");
    let rows: Vec<Vec<String>> = config
        .recent_activity
        .iter()
        .map(|a| vec![format!("{} {}", a.icon, a.description), a.timestamp.clone()])
        .collect();
    print_table(&["activity", "when"], &rows);
}

pub fn print_user_types(entries: &[UserTypeEntry]) {
    if output_is_json() {
        return print_json(&entries);
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| vec![e.name.clone(), e.description.clone()])
        .collect();
    print_table(&["type", "description"], &rows);
}

pub fn print_categories(categories: &[String]) {
    if output_is_json() {
        return print_json(&categories);
    }
    let rows: Vec<Vec<String>> = categories.iter().map(|c| vec![c.clone()]).collect();
    print_table(&["category"], &rows);
}

// Render a fixed-column ASCII table.
fn print_table(cols: &[&str], rows: &[Vec<String>]) {
    let max_col_width: usize = 60; // cap to keep output readable
    let mut widths: Vec<usize> = cols.iter().map(|c| display_len(c).min(max_col_width)).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate().take(cols.len()) {
            let w = display_len(cell);
            if w > widths[i] {
                widths[i] = w.min(max_col_width);
            }
        }
    }

    let sep = build_separator(&widths);
    println!("{}", sep);
    let header: Vec<String> = cols.iter().map(|c| c.to_string()).collect();
    println!("{}", build_row(&header, &widths));
    println!("{}", sep);
    for r in rows {
        println!("{}", build_row(r, &widths));
    }
    println!("{}", sep);
}

fn display_len(s: &str) -> usize {
    s.chars().count()
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).cloned().unwrap_or_default();
        let text = truncate(&cell, *w);
        s.push(' ');
        s.push_str(&text);
        let pad = w.saturating_sub(display_len(&text));
        s.push_str(&" ".repeat(pad));
        s.push(' ');
        s.push('|');
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "…".to_string();
    }
    let take = max - 1;
    s.chars().take(take).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_caps_wide_cells() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long category name", 10), "a very lo…");
        assert_eq!(truncate("xy", 1), "…");
    }

    #[test]
    fn separator_matches_widths() {
        assert_eq!(build_separator(&[3, 1]), "+-----+---+");
    }
}
