//! Plain text renderings of the menu screens.

use std::fmt::Write;

use crate::config::MenuConfig;
use crate::menu::{CourseAverages, CourseSelection, MenuItem, MenuStore};

const NO_ITEMS: &str = "No menu items yet. Please add some!";
const NO_ITEMS_IN_COURSE: &str = "No items in this category.";

pub fn home(config: &MenuConfig, store: &MenuStore) -> String {
    let mut out = String::new();
    writeln!(out, "{}", config.title).ok();
    writeln!(out, "Total Items: {}", store.len()).ok();
    out.push_str(&averages(config, &store.averages_by_course()));
    writeln!(out).ok();

    if store.is_empty() {
        writeln!(out, "{}", NO_ITEMS).ok();
    } else {
        for item in store.list() {
            out.push_str(&item_block(config, item));
        }
    }
    out
}

pub fn averages(config: &MenuConfig, averages: &CourseAverages) -> String {
    let mut out = String::new();
    for (course, avg) in averages.iter() {
        writeln!(out, "Avg {}: {}{:.2}", course, config.currency, avg).ok();
    }
    out
}

pub fn filtered(config: &MenuConfig, selection: &CourseSelection, items: &[MenuItem]) -> String {
    let mut out = String::new();
    writeln!(out, "Filter: {}", selection.label()).ok();

    let shown = selection.apply(items);
    if shown.is_empty() {
        writeln!(out, "{}", NO_ITEMS_IN_COURSE).ok();
    } else {
        for item in shown {
            out.push_str(&item_block(config, item));
        }
    }
    out
}

fn item_block(config: &MenuConfig, item: &MenuItem) -> String {
    format!(
        "{} ({}{})\n  {}\n  {}\n",
        item.dish_name(),
        config.currency,
        item.price(),
        item.description(),
        item.course()
    )
}
