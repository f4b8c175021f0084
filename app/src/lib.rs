use anyhow::Result;
use log::*;

pub mod config;
pub mod menu;
pub mod services;
pub mod session;
pub mod views;

use crate::menu::{filter, CourseAverages, MenuItem, MenuStore, Validator};
use crate::services::{AddMenuItem, AveragePrices, Commandable, FilterMenu, Queryable, ShowMenu};
use infra::ids::Id;

/// One running session: the menu and the only way to add to it.
#[derive(Debug)]
pub struct MenuCard {
    store: MenuStore,
    validator: Validator,
}

impl MenuCard {
    pub fn new(config: &config::Config) -> Self {
        info!("Opening menu card: {:?}", config.menu.title);
        let store = MenuStore::new();
        let validator = Validator::new(&config.validation);
        MenuCard { store, validator }
    }

    pub fn menu(&self) -> &MenuStore {
        &self.store
    }
}

impl Commandable<AddMenuItem> for MenuCard {
    fn execute(&mut self, req: AddMenuItem) -> Result<Id<MenuItem>> {
        let AddMenuItem {
            dish_name,
            description,
            course,
            price,
        } = req;
        let item = self
            .validator
            .validate(&dish_name, &description, &course, &price)
            .map_err(|e| {
                warn!("Rejected {:?}: {}", dish_name, e);
                e
            })?;
        let id = item.id();
        self.store.add(item);
        Ok(id)
    }
}

impl Queryable<ShowMenu> for MenuCard {
    fn query(&self, _: ShowMenu) -> Result<Vec<MenuItem>> {
        debug!("Show menu of {} items", self.store.len());
        Ok(self.store.list().to_vec())
    }
}

impl Queryable<AveragePrices> for MenuCard {
    fn query(&self, _: AveragePrices) -> Result<CourseAverages> {
        Ok(self.store.averages_by_course())
    }
}

impl Queryable<FilterMenu> for MenuCard {
    fn query(&self, FilterMenu(course): FilterMenu) -> Result<Vec<MenuItem>> {
        debug!("Filter menu by {:?}", course);
        let items = filter::apply(self.store.list(), course)
            .into_iter()
            .cloned()
            .collect();
        Ok(items)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::{Course, Field, ValidationError};

    fn add(dish_name: &str, description: &str, course: &str, price: &str) -> AddMenuItem {
        AddMenuItem {
            dish_name: dish_name.to_string(),
            description: description.to_string(),
            course: course.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn added_item_should_be_last() -> Result<()> {
        let mut card = MenuCard::new(&Default::default());
        card.execute(add("Soup", "Hot", "Starters", "25.00"))?;
        let id = card.execute(add("Steak", "Grilled", "Mains", "150.00"))?;

        let menu = card.query(ShowMenu)?;
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.last().map(|i| i.id()), Some(id));
        Ok(())
    }

    #[test]
    fn rejected_item_should_leave_menu_unchanged() -> Result<()> {
        let mut card = MenuCard::new(&Default::default());
        card.execute(add("Soup", "Hot", "Starters", "25.00"))?;

        let err = card
            .execute(add("", "x", "Mains", "10"))
            .expect_err("blank dish name");

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyField(Field::DishName))
        );
        assert_eq!(card.menu().len(), 1);
        Ok(())
    }

    #[test]
    fn should_answer_filter_and_average_queries() -> Result<()> {
        let mut card = MenuCard::new(&Default::default());
        card.execute(add("Bread", "Warm", "Starters", "10.00"))?;
        card.execute(add("Steak", "Grilled", "Mains", "150.00"))?;
        card.execute(add("Soup", "Hot", "Starters", "20.00"))?;

        let starters = card.query(FilterMenu(Some(Course::Starters)))?;
        let names = starters.iter().map(|i| i.dish_name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Bread", "Soup"]);
        assert_eq!(card.query(FilterMenu(None))?, card.query(ShowMenu)?);

        let averages = card.query(AveragePrices)?;
        assert_eq!(averages.get(Course::Starters), 15.0);
        assert_eq!(averages.get(Course::Dessert), 0.0);
        Ok(())
    }
}
