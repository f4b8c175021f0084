use std::collections::BTreeMap;

use log::*;
use serde::Serialize;

use super::models::{Course, MenuItem};

/// The session's menu, in the order items were added.
#[derive(Debug, Default, Clone)]
pub struct MenuStore {
    items: Vec<MenuItem>,
}

/// Mean price per course, with an entry for every course.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CourseAverages(BTreeMap<Course, f64>);

impl MenuStore {
    pub fn new() -> Self {
        MenuStore::default()
    }

    pub fn add(&mut self, item: MenuItem) {
        info!("Adding {} to the menu: {:?}", item.id(), item.dish_name());
        self.items.push(item);
    }

    pub fn list(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn averages_by_course(&self) -> CourseAverages {
        let averages = Course::ALL
            .iter()
            .map(|&course| {
                let (sum, count) = self
                    .items
                    .iter()
                    .filter(|item| item.course() == course)
                    .fold((0.0, 0usize), |(sum, n), item| {
                        (sum + item.price().amount(), n + 1)
                    });
                let mean = if count == 0 {
                    0.0
                } else {
                    round_cents(sum / count as f64)
                };
                (course, mean)
            })
            .collect::<BTreeMap<_, _>>();
        debug!("Averages over {} items: {:?}", self.items.len(), averages);
        CourseAverages(averages)
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl CourseAverages {
    pub fn get(&self, course: Course) -> f64 {
        self.0.get(&course).copied().unwrap_or(0.0)
    }

    pub fn iter<'a>(&'a self) -> impl 'a + Iterator<Item = (Course, f64)> {
        self.0.iter().map(|(&c, &avg)| (c, avg))
    }
}
