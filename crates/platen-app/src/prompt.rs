// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal prompts — the interactive surface of the scan workflow.
//
// The session core only sees the `SessionPrompter` trait; everything here
// is replaceable by a GUI without touching the workflow. An empty answer
// (blank line or EOF on a closed stdin) always counts as a decline, so no
// prompt can loop forever without input.

use std::io::{BufRead, Write};

use platen_core::types::{CapturedPage, Category, PageSide, RecipeForm, ReviewDecision};
use platen_scanner::SourceInfo;
use platen_session::SessionPrompter;

/// Print `prompt` and read one trimmed line from stdin. EOF and read
/// errors yield an empty string, which every caller treats as a decline.
pub fn ask(prompt: &str) -> String {
    ask_from(&mut std::io::stdin().lock(), prompt)
}

fn ask_from(input: &mut impl BufRead, prompt: &str) -> String {
    print!("{prompt} ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => line.trim().to_string(),
        Err(_) => String::new(),
    }
}

/// Yes/no question; only an explicit `y`/`yes` counts as yes.
pub fn ask_yes_no(prompt: &str) -> bool {
    yes(&ask(&format!("{prompt} [y/N]")))
}

fn yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Collect the new-recipe form, re-prompting until it validates. Each
/// validation failure keeps the form open for correction; an empty recipe
/// name declines the form entirely.
pub fn read_recipe_form() -> Option<RecipeForm> {
    read_recipe_form_from(&mut std::io::stdin().lock())
}

fn read_recipe_form_from(input: &mut impl BufRead) -> Option<RecipeForm> {
    loop {
        let title = ask_from(input, "Recipe name:");
        if title.is_empty() {
            return None;
        }
        let category = read_category_from(input)?;
        let double_sided = yes(&ask_from(input, "Double-sided? [y/N]"));

        let form = RecipeForm::new(title, category, double_sided);
        match form.validate() {
            Ok(()) => return Some(form),
            Err(err) => {
                let human = platen_core::human_errors::humanize_error(&err);
                println!("{} {}", human.message, human.suggestion);
            }
        }
    }
}

fn read_category_from(input: &mut impl BufRead) -> Option<Category> {
    println!("Recipe type:");
    for (i, name) in Category::MENU.iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }
    loop {
        let choice = ask_from(input, "Pick a number:");
        if choice.is_empty() {
            return None;
        }
        let Ok(index) = choice.parse::<usize>() else {
            continue;
        };
        let Some(name) = Category::MENU.get(index.wrapping_sub(1)).copied() else {
            continue;
        };
        if let Some(category) = Category::from_menu_name(name) {
            return Some(category);
        }
        // "Other" expands to free text; emptiness is caught by validation.
        return Some(Category::other(&ask_from(input, "Recipe type (free text):")));
    }
}

/// Pick a scanner source: the only one if there is one, otherwise by
/// number. `None` means the operator declined (or stdin is closed).
pub fn choose_source(sources: &[SourceInfo]) -> Option<String> {
    choose_source_from(&mut std::io::stdin().lock(), sources)
}

fn choose_source_from(input: &mut impl BufRead, sources: &[SourceInfo]) -> Option<String> {
    match sources {
        [] => None,
        [only] => Some(only.name.clone()),
        _ => {
            println!("Available scanners:");
            for (i, source) in sources.iter().enumerate() {
                let desc = source.description.as_deref().unwrap_or("");
                println!("  {}. {} {desc}", i + 1, source.name);
            }
            loop {
                let choice = ask_from(input, "Pick a number:");
                if choice.is_empty() {
                    return None;
                }
                if let Ok(index) = choice.parse::<usize>() {
                    if let Some(source) = sources.get(index.wrapping_sub(1)) {
                        return Some(source.name.clone());
                    }
                }
            }
        }
    }
}

/// `SessionPrompter` over stdin/stdout.
pub struct TerminalPrompter;

impl SessionPrompter for TerminalPrompter {
    fn confirm_scan(&mut self, side: PageSide) -> bool {
        let sheet_side = match side {
            PageSide::Front => "FRONT",
            PageSide::Back => "BACK",
        };
        ask_yes_no(&format!(
            "Place the {sheet_side} of the recipe sheet on the scanner. Ready?"
        ))
    }

    fn review_page(&mut self, page: &CapturedPage) -> ReviewDecision {
        println!(
            "Captured {} page: {}x{} px, saved to {}",
            page.side,
            page.width_px,
            page.height_px,
            page.path.display()
        );
        loop {
            match ask("[c]ontinue, [r]escan, or [a]bort?")
                .to_ascii_lowercase()
                .as_str()
            {
                "c" | "continue" => return ReviewDecision::Accept,
                "r" | "rescan" => return ReviewDecision::Retry,
                "a" | "abort" | "" => return ReviewDecision::Abort,
                _ => {}
            }
        }
    }

    fn confirm_flip(&mut self) -> bool {
        ask_yes_no("Flip the recipe sheet, then confirm to scan the back.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn input(script: &str) -> Cursor<Vec<u8>> {
        Cursor::new(script.as_bytes().to_vec())
    }

    #[test]
    fn closed_stdin_declines_the_form() {
        assert!(read_recipe_form_from(&mut input("")).is_none());
    }

    #[test]
    fn closed_stdin_during_category_declines_the_form() {
        // Title entered, then EOF at the category menu.
        assert!(read_recipe_form_from(&mut input("Carrot Cake\n")).is_none());
    }

    #[test]
    fn invalid_category_numbers_reprompt_until_a_valid_one() {
        let mut script = input("Apple Pie\n0\n99\nx\n5\ny\n");
        let form = read_recipe_form_from(&mut script).expect("form");
        assert_eq!(form.title, "Apple Pie");
        assert_eq!(form.category, Category::Pie);
        assert!(form.double_sided);
    }

    #[test]
    fn other_category_reads_free_text() {
        let mut script = input("Salsa Verde\n8\nSauce\nn\n");
        let form = read_recipe_form_from(&mut script).expect("form");
        assert_eq!(form.category, Category::other("Sauce"));
        assert!(!form.double_sided);
    }

    fn source(name: &str) -> SourceInfo {
        SourceInfo {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn single_source_is_chosen_without_a_prompt() {
        let sources = [source("flatbed")];
        let chosen = choose_source_from(&mut input(""), &sources);
        assert_eq!(chosen.as_deref(), Some("flatbed"));
    }

    #[test]
    fn multiple_sources_are_chosen_by_number() {
        let sources = [source("flatbed"), source("feeder")];
        let chosen = choose_source_from(&mut input("2\n"), &sources);
        assert_eq!(chosen.as_deref(), Some("feeder"));
    }

    #[test]
    fn closed_stdin_declines_source_selection() {
        let sources = [source("flatbed"), source("feeder")];
        assert!(choose_source_from(&mut input(""), &sources).is_none());
        assert!(choose_source_from(&mut input("9\nzero\n"), &sources).is_none());
    }

    #[test]
    fn no_sources_yields_no_choice() {
        assert!(choose_source_from(&mut input("1\n"), &[]).is_none());
    }
}
